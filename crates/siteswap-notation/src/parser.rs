use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token};
use crate::span::Span;
use siteswap_core::{Action, Event, Group, Pattern};

/// Recursive-descent parser for siteswap notation.
///
/// Expects preprocessed text (no whitespace, lowercase). One token of
/// lookahead decides every production. Signs are accepted wherever the
/// grammar allows a value; whether a negative may actually be used is
/// decided later by the semantic gate, not here.
pub struct Parser<'source> {
    lexer: Lexer<'source>,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Parser {
            lexer: Lexer::new(source),
        }
    }

    /// Parse a complete pattern: one or more groups, each with an
    /// optional `^value` quantity, consuming all input.
    pub fn parse_pattern(&mut self) -> Result<Pattern> {
        let mut groups = Vec::new();
        if self.peek().is_none() {
            return Err(ParseError::unexpected_eof("a pattern"));
        }
        while self.peek().is_some() {
            let mut group = self.parse_group()?;
            group.quantity = self.parse_optional_quantity()?;
            groups.push(group);
        }
        Ok(Pattern::new(groups))
    }

    /// `group ::= tuple suppression? | action`
    fn parse_group(&mut self) -> Result<Group> {
        if let Some((Token::LParen, _)) = self.peek() {
            self.parse_tuple()
        } else {
            let action = self.parse_action()?;
            Ok(Group::bare(action, 1))
        }
    }

    /// `tuple ::= '(' action (',' action)* ')'` plus trailing `!` marks.
    fn parse_tuple(&mut self) -> Result<Group> {
        self.next(); // consume (
        let mut actions = vec![self.parse_action()?];
        loop {
            match self.next() {
                Some((Token::Comma, _)) => actions.push(self.parse_action()?),
                Some((Token::RParen, _)) => break,
                Some((token, span)) => {
                    return Err(ParseError::unexpected_token(
                        "',' or ')'",
                        token.to_string(),
                        span,
                    ));
                }
                None => return Err(ParseError::unexpected_eof("',' or ')'")),
            }
        }

        let mut suppression = 0;
        while let Some((Token::Bang, _)) = self.peek() {
            self.next();
            suppression += 1;
        }
        Ok(Group::tuple(actions, suppression, 1))
    }

    /// `action ::= '[' events+ ']' | event`. Events inside brackets may
    /// carry their own quantities; a bare event may not (a trailing
    /// `^value` at top level belongs to the group chain).
    fn parse_action(&mut self) -> Result<Action> {
        if let Some((Token::LBracket, _)) = self.peek() {
            self.next(); // consume [
            let mut events = vec![self.parse_counted_event()?];
            loop {
                match self.peek() {
                    Some((Token::RBracket, _)) => {
                        self.next();
                        break;
                    }
                    None => return Err(ParseError::unexpected_eof("']'")),
                    _ => events.push(self.parse_counted_event()?),
                }
            }
            Ok(Action::new(events))
        } else {
            let (value, offset) = self.parse_event()?;
            Ok(Action::new(vec![Event::new(value, offset, 1)]))
        }
    }

    fn parse_counted_event(&mut self) -> Result<Event> {
        let (value, offset) = self.parse_event()?;
        let quantity = self.parse_optional_quantity()?;
        Ok(Event::new(value, offset, quantity))
    }

    /// `event ::= value 'x'*`
    fn parse_event(&mut self) -> Result<(i64, usize)> {
        let value = self.parse_value()?;
        let mut offset = 0;
        while let Some((Token::Cross, _)) = self.peek() {
            self.next();
            offset += 1;
        }
        Ok((value, offset))
    }

    /// `value ::= '-'? (digit | letter) | braced`. A sign never
    /// precedes a braced literal; braces carry their own.
    fn parse_value(&mut self) -> Result<i64> {
        match self.next() {
            Some((Token::Digit(n) | Token::Letter(n) | Token::Braced(n), _)) => Ok(n),
            Some((Token::Minus, _)) => match self.next() {
                Some((Token::Digit(n) | Token::Letter(n), _)) => Ok(-n),
                Some((token, span)) => Err(ParseError::unexpected_token(
                    "a digit or letter after '-'",
                    token.to_string(),
                    span,
                )),
                None => Err(ParseError::unexpected_eof("a digit or letter after '-'")),
            },
            Some((token, span)) => Err(ParseError::unexpected_token(
                "a value",
                token.to_string(),
                span,
            )),
            None => Err(ParseError::unexpected_eof("a value")),
        }
    }

    /// `quantity ::= '^' value`, defaulting to 1 when absent.
    fn parse_optional_quantity(&mut self) -> Result<i64> {
        if let Some((Token::Caret, _)) = self.peek() {
            self.next();
            self.parse_value()
        } else {
            Ok(1)
        }
    }

    fn peek(&mut self) -> Option<(Token, Span)> {
        self.lexer.peek_token()
    }

    fn next(&mut self) -> Option<(Token, Span)> {
        self.lexer.next_token()
    }
}

/// Parse preprocessed siteswap text into the semantic model.
pub fn parse(source: &str) -> Result<Pattern> {
    Parser::new(source).parse_pattern()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_fails(input: &str) {
        if parse(input).is_ok() {
            panic!("expected parse to fail for '{}'", input);
        }
    }

    #[test]
    fn test_parse_async_sequence() {
        let pattern = parse("744").unwrap();
        assert_eq!(pattern.groups.len(), 3);
        assert!(pattern.groups.iter().all(|g| g.implicit));
        assert_eq!(pattern.groups[0].actions[0].events[0].value, 7);
    }

    #[test]
    fn test_parse_letter_values() {
        let pattern = parse("b1").unwrap();
        assert_eq!(pattern.groups[0].actions[0].events[0].value, 11);
    }

    #[test]
    fn test_parse_braced_value() {
        let pattern = parse("{30}").unwrap();
        assert_eq!(pattern.groups[0].actions[0].events[0].value, 30);
    }

    #[test]
    fn test_parse_crossing_offsets() {
        let pattern = parse("4xx").unwrap();
        let event = pattern.groups[0].actions[0].events[0];
        assert_eq!(event.offset, 2);
    }

    #[test]
    fn test_parse_group_quantity() {
        let pattern = parse("4^6").unwrap();
        assert_eq!(pattern.groups[0].quantity, 6);
    }

    #[test]
    fn test_parse_negative_quantity() {
        let pattern = parse("5^-1").unwrap();
        assert_eq!(pattern.groups[0].quantity, -1);
    }

    #[test]
    fn test_parse_braced_quantity() {
        let pattern = parse("1^{99}").unwrap();
        assert_eq!(pattern.groups[0].quantity, 99);
    }

    #[test]
    fn test_parse_multiplex() {
        let pattern = parse("[43]23").unwrap();
        assert_eq!(pattern.groups.len(), 3);
        let multiplex = &pattern.groups[0].actions[0];
        assert_eq!(multiplex.events.len(), 2);
        assert_eq!(multiplex.events[0], Event::new(4, 0, 1));
        assert_eq!(multiplex.events[1], Event::new(3, 0, 1));
    }

    #[test]
    fn test_parse_multiplex_event_quantity() {
        let pattern = parse("[4^23]").unwrap();
        let events = &pattern.groups[0].actions[0].events;
        assert_eq!(events[0], Event::new(4, 0, 2));
        assert_eq!(events[1], Event::new(3, 0, 1));
    }

    #[test]
    fn test_parse_tuple_with_suppression() {
        let pattern = parse("(4,4)!").unwrap();
        let group = &pattern.groups[0];
        assert!(!group.implicit);
        assert_eq!(group.actions.len(), 2);
        assert_eq!(group.suppression, 1);
    }

    #[test]
    fn test_parse_tuple_of_three() {
        let pattern = parse("(4,4,4)!!").unwrap();
        assert_eq!(pattern.groups[0].actions.len(), 3);
        assert_eq!(pattern.groups[0].suppression, 2);
    }

    #[test]
    fn test_parse_negative_value() {
        let pattern = parse("-5").unwrap();
        assert_eq!(pattern.groups[0].actions[0].events[0].value, -5);
    }

    #[test]
    fn test_parse_mixed_tuple_and_bare() {
        let pattern = parse("3(4,4)3").unwrap();
        assert!(pattern.groups[0].implicit);
        assert!(!pattern.groups[1].implicit);
        assert!(pattern.groups[2].implicit);
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert_fails("");
        assert_fails("-");
        assert_fails("{a}");
        assert_fails("[]");
        assert_fails("()");
        assert_fails("(4,4");
        assert_fails("4]");
        assert_fails("3!");
        assert_fails("^3");
        assert_fails("-{5}");
        assert_fails("(4^2,4)");
        assert_fails("q");
    }
}
