use crate::ast::{BinaryOp, Expr, ExprKind, Literal, Program, Span, Stmt, StmtKind, TypeName, UnaryOp};
use chumsky::prelude::*;
use chumsky::BoxedParser;
use lexer::token::Token;

pub fn parser() -> impl Parser<Token, Program, Error = Simple<Token>> {
    stmt_parser()
        .repeated()
        .map(|statements| Program { statements })
        .then_ignore(end())
}

fn unescape(literal: &str) -> String {
    let content = literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(literal);

    let mut text = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            text.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('t') => text.push('\t'),
            Some('r') => text.push('\r'),
            Some('b') => text.push('\u{8}'),
            Some('f') => text.push('\u{c}'),
            Some(other) => text.push(other),
            None => text.push('\\'),
        }
    }
    text
}

fn stmt_parser() -> impl Parser<Token, Stmt, Error = Simple<Token>> {
    let keyword = just(Token::Var).to(false).or(just(Token::Const).to(true));

    let type_name = select! { Token::Identifier(name) => name }
        .map_with_span(|name, span: Span| TypeName { name, span });

    let decl = keyword
        .then(select! { Token::Identifier(name) => name })
        .then(
            // Path 1: Inference (:=)
            just(Token::ColonEq)
                .ignore_then(expr_parser())
                .map(|value| (None, Some(value)))
                // Path 2: Explicit (: uint8 = ...), initializer optional
                .or(just(Token::Colon)
                    .ignore_then(type_name)
                    .then(just(Token::Eq).ignore_then(expr_parser()).or_not())
                    .map(|(type_hint, value)| (Some(type_hint), value))),
        )
        .map_with_span(|((is_const, name), (type_hint, value)), span| Stmt {
            kind: StmtKind::VariableDecl {
                name,
                type_hint,
                value,
                is_const,
            },
            span,
        });

    let expr_stmt = expr_parser().map_with_span(|expr, span| Stmt {
        kind: StmtKind::Expr(expr),
        span,
    });

    decl.or(expr_stmt)
        .then_ignore(just(Token::Semicolon).or_not())
        .boxed()
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.start..rhs.span.end;
    Expr::new(
        ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    )
}

// One left-associative precedence level
fn left_assoc<'a>(
    operand: BoxedParser<'a, Token, Expr, Simple<Token>>,
    op: impl Parser<Token, BinaryOp, Error = Simple<Token>> + Clone + 'a,
) -> BoxedParser<'a, Token, Expr, Simple<Token>> {
    operand
        .clone()
        .then(op.then(operand).repeated())
        .foldl(|lhs, (op, rhs)| binary(op, lhs, rhs))
        .boxed()
}

pub fn expr_parser() -> impl Parser<Token, Expr, Error = Simple<Token>> + Clone {
    recursive(|expr| {
        let val = select! {
            Token::Int(n) => ExprKind::Literal(Literal::Number(n)),
            Token::Decimal(n) => ExprKind::Literal(Literal::Number(n)),
            Token::String(s) => ExprKind::Literal(Literal::String(unescape(&s))),
            Token::True => ExprKind::Literal(Literal::Bool(true)),
            Token::False => ExprKind::Literal(Literal::Bool(false)),
            Token::Identifier(s) => ExprKind::Identifier(s),
        }
        .map_with_span(Expr::new);

        // (a) is a grouping expression, (a, b) a tuple
        let tuple = expr
            .clone()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map_with_span(|items, span| Expr::new(ExprKind::Tuple(items), span));

        let array_literal = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map_with_span(|items, span| Expr::new(ExprKind::Array(items), span));

        let atom = val.or(tuple).or(array_literal);

        // Prefix operators (-x, !x, ~x)
        let unary = choice((
            just(Token::Minus).to(UnaryOp::Negate),
            just(Token::Not).to(UnaryOp::Not),
            just(Token::Tilde).to(UnaryOp::BitNot),
        ))
        .map_with_span(|op, span: Span| (op, span))
        .repeated()
        .then(atom)
        .foldr(|(op, op_span), expr| {
            let span = op_span.start..expr.span.end;
            Expr::new(
                ExprKind::Unary {
                    op,
                    expr: Box::new(expr),
                },
                span,
            )
        })
        .boxed();

        // Exponentiation is right-associative: 2 ** 3 ** 2 == 2 ** 9
        let power = unary
            .clone()
            .then(just(Token::Pow).ignore_then(unary).repeated())
            .map(|(first, mut rest)| match rest.pop() {
                None => first,
                Some(last) => {
                    let mut folded = last;
                    while let Some(lhs) = rest.pop() {
                        folded = binary(BinaryOp::Pow, lhs, folded);
                    }
                    binary(BinaryOp::Pow, first, folded)
                }
            })
            .boxed();

        let product = left_assoc(
            power,
            just(Token::Star)
                .to(BinaryOp::Mul)
                .or(just(Token::Slash).to(BinaryOp::Div))
                .or(just(Token::Percent).to(BinaryOp::Mod)),
        );

        let sum = left_assoc(
            product,
            just(Token::Plus)
                .to(BinaryOp::Add)
                .or(just(Token::Minus).to(BinaryOp::Sub)),
        );

        let shift = left_assoc(
            sum,
            just(Token::Shl)
                .to(BinaryOp::Shl)
                .or(just(Token::Shr).to(BinaryOp::Shr)),
        );

        let bit_and = left_assoc(shift, just(Token::Ampersand).to(BinaryOp::BitAnd));
        let bit_xor = left_assoc(bit_and, just(Token::Caret).to(BinaryOp::BitXor));
        let bit_or = left_assoc(bit_xor, just(Token::Pipe).to(BinaryOp::BitOr));

        let relational = left_assoc(
            bit_or,
            choice((
                just(Token::Lt).to(BinaryOp::Lt),
                just(Token::Gt).to(BinaryOp::Gt),
                just(Token::LtEq).to(BinaryOp::LtEq),
                just(Token::GtEq).to(BinaryOp::GtEq),
            )),
        );

        let equality = left_assoc(
            relational,
            just(Token::DoubleEq)
                .to(BinaryOp::Eq)
                .or(just(Token::NotEq).to(BinaryOp::NotEq)),
        );

        let logic_and = left_assoc(equality, just(Token::And).to(BinaryOp::LogicalAnd));

        left_assoc(logic_and, just(Token::Or).to(BinaryOp::LogicalOr))
    })
}
