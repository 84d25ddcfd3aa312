use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::expression::Expr;
use crate::operators::{BinaryOp, UnaryOp};
use crate::TruthValue;

lazy_static! {
    // Token patterns in match-priority order; multi-character operators
    // come before their single-character prefixes.
    static ref OPEN_PAREN: Regex = Regex::new(r"^\(").expect("valid regex");
    static ref CLOSE_PAREN: Regex = Regex::new(r"^\)").expect("valid regex");
    static ref LITERAL: Regex = Regex::new(r"^[TF]").expect("valid regex");
    static ref UNARY_OP: Regex = Regex::new(r"^~").expect("valid regex");
    static ref BINARY_OP: Regex = Regex::new(r"^(<->|->|[&|+])").expect("valid regex");
    static ref VARIABLE: Regex = Regex::new(r"^[a-z]+").expect("valid regex");
}

/// A syntax error at a character position of the source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub pos: usize,
    pub message: String,
}

impl SyntaxError {
    fn new(pos: usize, message: impl Into<String>) -> Self {
        Self {
            pos,
            message: message.into(),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at position {}: {}", self.pos, self.message)
    }
}

impl std::error::Error for SyntaxError {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TokenKind {
    Start,
    End,
    OpenParen,
    CloseParen,
    Literal(TruthValue),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Variable(String),
}

impl TokenKind {
    /// The category name used in adjacency error messages.
    const fn description(&self) -> &'static str {
        match self {
            Self::Start => "start of string",
            Self::End => "end of string",
            Self::OpenParen => "opening parenthesis",
            Self::CloseParen => "closing parenthesis",
            Self::Literal(_) => "literal",
            Self::Unary(_) => "unary operator",
            Self::Binary(_) => "binary operator",
            Self::Variable(_) => "variable",
        }
    }

    /// Whether `next` may directly follow `self` in a well-formed token
    /// stream.
    fn may_precede(&self, next: &Self) -> bool {
        match self {
            Self::Start | Self::Binary(_) | Self::OpenParen | Self::Unary(_) => matches!(
                next,
                Self::Literal(_) | Self::Variable(_) | Self::Unary(_) | Self::OpenParen
            ) || (*self == Self::Start && *next == Self::End),
            Self::Literal(_) | Self::Variable(_) | Self::CloseParen => {
                matches!(next, Self::Binary(_) | Self::CloseParen | Self::End)
            }
            Self::End => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

/// Parses an infix boolean expression into an [`Expr`].
///
/// Whitespace between tokens is ignored. An input containing no tokens at
/// all yields `Ok(None)`. Malformed input yields a [`SyntaxError`] carrying
/// the character position of the offending token.
pub fn parse(source: &str) -> Result<Option<Rc<Expr>>, SyntaxError> {
    let tokens = tokenize(source)?;
    check_adjacency(&tokens)?;
    let postfix = infix_to_postfix(&tokens)?;
    evaluate_postfix(&postfix)
}

fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut tokens = vec![Token {
        kind: TokenKind::Start,
        pos: 0,
    }];

    let mut pos = 0;
    while pos < source.len() {
        let rest = &source[pos..];
        if let Some(c) = rest.chars().next().filter(|c| c.is_whitespace()) {
            pos += c.len_utf8();
            continue;
        }

        let (kind, len) = match_token(rest)
            .ok_or_else(|| SyntaxError::new(pos, "invalid token"))?;
        tokens.push(Token { kind, pos });
        pos += len;
    }

    tokens.push(Token {
        kind: TokenKind::End,
        pos: source.len(),
    });
    Ok(tokens)
}

/// Matches the highest-priority token pattern at the start of `rest`,
/// returning its kind and byte length.
fn match_token(rest: &str) -> Option<(TokenKind, usize)> {
    if OPEN_PAREN.is_match(rest) {
        return Some((TokenKind::OpenParen, 1));
    }
    if CLOSE_PAREN.is_match(rest) {
        return Some((TokenKind::CloseParen, 1));
    }
    if let Some(m) = LITERAL.find(rest) {
        let value = TruthValue::from(m.as_str() == "T");
        return Some((TokenKind::Literal(value), m.len()));
    }
    if UNARY_OP.is_match(rest) {
        return Some((TokenKind::Unary(UnaryOp::Negation), 1));
    }
    if let Some(m) = BINARY_OP.find(rest) {
        let op = match m.as_str() {
            "<->" => BinaryOp::Biconditional,
            "->" => BinaryOp::Implication,
            "&" => BinaryOp::Conjunction,
            "|" => BinaryOp::Disjunction,
            _ => BinaryOp::ExclDisjunction,
        };
        return Some((TokenKind::Binary(op), m.len()));
    }
    if let Some(m) = VARIABLE.find(rest) {
        return Some((TokenKind::Variable(m.as_str().to_string()), m.len()));
    }
    None
}

fn check_adjacency(tokens: &[Token]) -> Result<(), SyntaxError> {
    for (prev, token) in tokens.iter().zip(tokens.iter().skip(1)) {
        if !prev.kind.may_precede(&token.kind) {
            return Err(SyntaxError::new(
                token.pos,
                format!(
                    "unexpected {} after {}",
                    token.kind.description(),
                    prev.kind.description()
                ),
            ));
        }
    }
    Ok(())
}

const fn operator_precedence(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Unary(op) => Some(op.precedence()),
        TokenKind::Binary(op) => Some(op.precedence()),
        _ => None,
    }
}

/// Shunting-yard conversion of the token stream (bookends excluded) to
/// postfix order.
fn infix_to_postfix(tokens: &[Token]) -> Result<Vec<Token>, SyntaxError> {
    let mut postfix: Vec<Token> = Vec::new();
    let mut operators: Vec<Token> = Vec::new();

    for token in &tokens[1..tokens.len() - 1] {
        match &token.kind {
            TokenKind::OpenParen | TokenKind::Unary(_) => operators.push(token.clone()),
            TokenKind::CloseParen => {
                loop {
                    match operators.pop() {
                        Some(top) if top.kind == TokenKind::OpenParen => break,
                        Some(top) => postfix.push(top),
                        None => {
                            return Err(SyntaxError::new(
                                token.pos,
                                "unmatched closing parenthesis",
                            ))
                        }
                    }
                }
            }
            TokenKind::Binary(op) => {
                while operators.last().is_some_and(|top| {
                    operator_precedence(&top.kind)
                        .is_some_and(|prec| prec >= op.precedence())
                }) {
                    postfix.extend(operators.pop());
                }
                operators.push(token.clone());
            }
            TokenKind::Literal(_) | TokenKind::Variable(_) => postfix.push(token.clone()),
            TokenKind::Start | TokenKind::End => {
                return Err(SyntaxError::new(token.pos, "internal: stray bookend token"))
            }
        }
    }

    while let Some(top) = operators.pop() {
        if top.kind == TokenKind::OpenParen {
            return Err(SyntaxError::new(top.pos, "unmatched opening parenthesis"));
        }
        postfix.push(top);
    }

    Ok(postfix)
}

/// Builds the expression tree by evaluating the postfix token stream over an
/// operand stack. The stack-shape errors below cannot trigger for input that
/// passed adjacency validation.
fn evaluate_postfix(postfix: &[Token]) -> Result<Option<Rc<Expr>>, SyntaxError> {
    if postfix.is_empty() {
        return Ok(None);
    }

    let mut operands: Vec<Rc<Expr>> = Vec::new();
    for token in postfix {
        let expr = match &token.kind {
            TokenKind::Literal(value) => Expr::literal(*value),
            TokenKind::Variable(name) => Expr::variable(name)
                .map_err(|e| SyntaxError::new(token.pos, e.to_string()))?,
            TokenKind::Unary(op) => {
                let rhs = pop_operand(&mut operands, token)?;
                Expr::unary(*op, rhs)
            }
            TokenKind::Binary(op) => {
                let rhs = pop_operand(&mut operands, token)?;
                let lhs = pop_operand(&mut operands, token)?;
                Expr::binary(*op, lhs, rhs)
            }
            _ => {
                return Err(SyntaxError::new(
                    token.pos,
                    format!("internal: unexpected {} in postfix", token.kind.description()),
                ))
            }
        };
        operands.push(expr);
    }

    match (operands.pop(), operands.is_empty()) {
        (Some(expr), true) => Ok(Some(expr)),
        _ => Err(SyntaxError::new(0, "internal: malformed operand stack")),
    }
}

fn pop_operand(operands: &mut Vec<Rc<Expr>>, token: &Token) -> Result<Rc<Expr>, SyntaxError> {
    operands.pop().ok_or_else(|| {
        SyntaxError::new(
            token.pos,
            format!("missing operand for {}", token.kind.description()),
        )
    })
}
