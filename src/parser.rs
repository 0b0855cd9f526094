use sqlparser::{
    ast::{ObjectName, Statement},
    dialect::PostgreSqlDialect,
    keywords::Keyword,
    parser::{Parser, ParserError},
    tokenizer::Token,
};

/// `CREATE <object>` forms that sqlparser can't read and that never carry
/// type information. They are skipped up to the next `;`.
const SKIPPED_CREATE_OBJECTS: &[&str] = &["EXTENSION", "DOMAIN"];

#[derive(Debug, Clone, PartialEq)]
pub struct CreateEnum {
    pub name: ObjectName,
    pub labels: Vec<String>,
}

/// A top level statement of a schema file.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaStatement {
    /// `CREATE TYPE <name> AS ENUM (...)`, which sqlparser has no node for.
    CreateEnum(CreateEnum),
    Sql(Statement),
    /// Statement consumed without being parsed, e.g. `CREATE EXTENSION`.
    Skipped,
}

/// Parses a PostgreSQL schema into its statements, in source order.
pub fn parse_schema(sql: &str) -> Result<Vec<SchemaStatement>, ParserError> {
    let dialect = PostgreSqlDialect {};
    let mut parser = Parser::new(&dialect).try_with_sql(sql)?;
    let mut statements = Vec::new();
    let mut expecting_delimiter = false;
    loop {
        // empty statements between successive delimiters
        while parser.consume_token(&Token::SemiColon) {
            expecting_delimiter = false;
        }

        let next = parser.peek_token();
        if next.token == Token::EOF {
            break;
        }

        if expecting_delimiter {
            return Err(ParserError::ParserError(format!(
                "Expected end of statement, found: {}",
                next.token
            )));
        }

        statements.push(parse_schema_statement(&mut parser)?);
        expecting_delimiter = true;
    }

    Ok(statements)
}

fn parse_schema_statement(parser: &mut Parser) -> Result<SchemaStatement, ParserError> {
    if !matches!(&parser.peek_token().token, Token::Word(w) if w.keyword == Keyword::CREATE) {
        return Ok(SchemaStatement::Sql(parser.parse_statement()?));
    }

    match &parser.peek_nth_token(1).token {
        Token::Word(w) if w.keyword == Keyword::TYPE => parse_create_type(parser),
        Token::Word(w)
            if SKIPPED_CREATE_OBJECTS
                .iter()
                .any(|object| w.value.eq_ignore_ascii_case(object)) =>
        {
            skip_statement(parser);
            Ok(SchemaStatement::Skipped)
        }
        _ => Ok(SchemaStatement::Sql(parser.parse_statement()?)),
    }
}

fn parse_create_type(parser: &mut Parser) -> Result<SchemaStatement, ParserError> {
    parser.expect_keywords(&[Keyword::CREATE, Keyword::TYPE])?;
    let name = parser.parse_object_name()?;
    parser.expect_keyword(Keyword::AS)?;

    // composite and range types carry nothing we generate
    if !parser.parse_keyword(Keyword::ENUM) {
        skip_statement(parser);
        return Ok(SchemaStatement::Skipped);
    }

    parser.expect_token(&Token::LParen)?;
    let labels = if parser.consume_token(&Token::RParen) {
        vec![]
    } else {
        let labels = parser.parse_comma_separated(|p| p.parse_literal_string())?;
        parser.expect_token(&Token::RParen)?;
        labels
    };

    Ok(SchemaStatement::CreateEnum(CreateEnum { name, labels }))
}

/// Advances up to, but not past, the next `;`.
fn skip_statement(parser: &mut Parser) {
    loop {
        match parser.peek_token().token {
            Token::SemiColon | Token::EOF => return,
            _ => {
                parser.next_token();
            }
        }
    }
}
