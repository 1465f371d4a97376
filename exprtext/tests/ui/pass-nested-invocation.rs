use exprtext::stringify;

fn main() {
    let ((value, inner), outer) = stringify!(stringify!(1 + 1));

    assert_eq!(value, 2);
    assert_eq!(inner, "1 + 1");
    assert!(outer.contains("1 + 1"));
}
