use diapo_common::Deck;

mod parser;
pub use parser::{ParseError, Parser};

pub fn parse(source: &str) -> Result<Deck, ParseError> {
    let mut parser = Parser::new();
    parser.parse(source)
}
