use exprtext::stringify;

fn main() {
    let _ = stringify!(1, 2);
}
