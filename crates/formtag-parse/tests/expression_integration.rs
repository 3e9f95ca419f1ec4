use formtag_parse::{TokenClass, Tokenizer, classify, parse};

#[test]
fn integration_tokens_cover_source_text() {
    let expressions = [
        "price * (discount / 100) ^ 2",
        "  -x+ 3 ",
        "(15/100) * tax",
        "1.5%2",
    ];
    for expr in expressions {
        let tokenizer = Tokenizer::new(expr).unwrap();
        let joined: String = tokenizer.items.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(joined, expr);
    }
}

#[test]
fn integration_precedence_shape() {
    let ast = parse("2 + 3 * 4").unwrap();
    assert_eq!(
        ast.to_string(),
        "BinaryOp(+, Number(2), BinaryOp(*, Number(3), Number(4)))"
    );

    let ast = parse("x * y + x").unwrap();
    assert_eq!(
        ast.to_string(),
        "BinaryOp(+, BinaryOp(*, Variable(x), Variable(y)), Variable(x))"
    );
}

#[test]
fn integration_dangling_remainder_is_rejected() {
    assert!(parse("price * discount %").is_err());
    assert!(parse("price * discount % 2").is_ok());
}

#[test]
fn integration_classified_fragments_reassemble() {
    let fragments = ["price", "*", "15%", "-", "Net Revenue"];
    let classes: Vec<TokenClass> = fragments.iter().map(|f| classify(f)).collect();
    assert_eq!(
        classes,
        [
            TokenClass::Variable,
            TokenClass::Operator,
            TokenClass::Percentage,
            TokenClass::Operator,
            TokenClass::Reference,
        ]
    );
    assert!(Tokenizer::new("Net Revenue").is_ok());
    assert!(Tokenizer::new("Net Revenue!").is_err());
}

#[test]
fn integration_long_sum_is_rejected_instead_of_overflowing() {
    let chain = vec!["1"; 200_000].join(" + ");
    assert!(parse(&chain).is_err());
}
