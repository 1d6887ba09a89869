// tests/lexer_tests.rs

use pretty_assertions::assert_eq;
use tally::ast::{BinOp, Token, TokenKind};
use tally::lexer::{LexError, Lexer};

fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize().unwrap()
}

fn ident(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("+", Token::Operator(BinOp::Add)),
        ("-", Token::Operator(BinOp::Subtract)),
        ("*", Token::Operator(BinOp::Multiply)),
        ("/", Token::Operator(BinOp::Divide)),
        ("%", Token::Operator(BinOp::Modulo)),
        ("=", Token::Assignment),
        ("(", Token::LParen),
        (")", Token::RParen),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token(), Ok(Some(expected)), "Failed for input: {}", input);
        assert_eq!(lexer.next_token(), Ok(None));
    }
}

#[test]
fn test_token_kinds() {
    let kinds: Vec<TokenKind> = lex("x = (1 + y)").iter().map(Token::kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::LeftParen,
            TokenKind::Number,
            TokenKind::Operator,
            TokenKind::Identifier,
            TokenKind::RightParen,
        ]
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let test_cases = vec![
        ("0", 0.0),
        ("42", 42.0),
        ("2.75", 2.75),
        (".5", 0.5),
        ("007", 7.0),
    ];

    for (input, expected) in test_cases {
        assert_eq!(lex(input), vec![Token::Number(expected)], "Failed for input: {}", input);
    }
}

#[test]
fn test_trailing_dot_is_rejected() {
    let err = Lexer::new("3.").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedInput {
            text: ".".to_string(),
            offset: 1,
        }
    );
}

#[test]
fn test_number_followed_by_letters_splits() {
    assert_eq!(lex("12abc"), vec![Token::Number(12.0), ident("abc")]);
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers() {
    assert_eq!(lex("x"), vec![ident("x")]);
    assert_eq!(lex("_tmp"), vec![ident("_tmp")]);
    assert_eq!(lex("total_2"), vec![ident("total_2")]);
    assert_eq!(lex("CamelCase"), vec![ident("CamelCase")]);
}

// ============================================================================
// Whole Lines
// ============================================================================

#[test]
fn test_assignment_line() {
    assert_eq!(
        lex("rate = (base + 2.5) % 7"),
        vec![
            ident("rate"),
            Token::Assignment,
            Token::LParen,
            ident("base"),
            Token::Operator(BinOp::Add),
            Token::Number(2.5),
            Token::RParen,
            Token::Operator(BinOp::Modulo),
            Token::Number(7.0),
        ]
    );
}

#[test]
fn test_no_whitespace_needed() {
    assert_eq!(lex("a=b*2"), lex("a = b * 2"));
}

#[test]
fn test_blank_input_has_no_tokens() {
    assert_eq!(lex(""), Vec::<Token>::new());
    assert_eq!(lex("   \t "), Vec::<Token>::new());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unknown_character() {
    let err = Lexer::new("3 + @").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedInput {
            text: "@".to_string(),
            offset: 4,
        }
    );
    assert!(err.to_string().contains('@'));
}

#[test]
fn test_unknown_run_is_reported_whole() {
    let err = Lexer::new("1 + #$ 2").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedInput {
            text: "#$".to_string(),
            offset: 4,
        }
    );
}

#[test]
fn test_leading_garbage() {
    let err = Lexer::new("  ^2").tokenize().unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedInput {
            text: "^".to_string(),
            offset: 2,
        }
    );
}

#[test]
fn test_non_ascii_identifier_rejected() {
    assert!(Lexer::new("é = 1").tokenize().is_err());
}

// ============================================================================
// Display
// ============================================================================

#[test]
fn test_token_display() {
    assert_eq!(Token::Number(5.0).to_string(), "Token(number, 5)");
    assert_eq!(ident("x").to_string(), "Token(identifier, x)");
    assert_eq!(Token::Operator(BinOp::Divide).to_string(), "Token(operator, /)");
    assert_eq!(Token::Assignment.to_string(), "Token(assignment, =)");
}
