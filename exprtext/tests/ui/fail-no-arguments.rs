use exprtext::stringify;

fn main() {
    let _ = stringify!();
}
