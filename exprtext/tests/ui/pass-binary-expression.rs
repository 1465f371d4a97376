use exprtext::stringify;

fn main() {
    let (x, y) = (2, 3);
    let (sum, text) = stringify!(x + y);

    assert_eq!(sum, 5);
    assert_eq!(text, "x + y");
}
