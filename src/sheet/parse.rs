//! Lenient CSS parsing into the rule model.
//!
//! Built on cssparser's rule/body parsers. Parsing never fails as a whole:
//! a rule with an uncompilable selector or a malformed declaration is
//! dropped and parsing continues with the next one.

use cssparser::{
    AtRuleParser, ParseError, Parser, ParserInput, QualifiedRuleParser, RuleBodyItemParser,
    RuleBodyParser, StyleSheetParser,
};
use selectors::parser::{ParseRelative, Selector, SelectorList};

use crate::dom::element_ref::InspectorSelectors;

use super::{Declaration, RuleSelector, SheetRule, StyleRule, Stylesheet};

impl Stylesheet {
    /// Parse a CSS stylesheet from a string.
    ///
    /// Rules that fail to parse are skipped; the rest of the sheet is kept.
    pub fn parse(label: impl Into<String>, css: &str) -> Self {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rules = Vec::new();

        let mut rule_parser = TopLevelRuleParser { rules: &mut rules };
        let stylesheet_parser = StyleSheetParser::new(&mut parser, &mut rule_parser);

        for result in stylesheet_parser {
            // Ignore errors - lenient parsing
            let _ = result;
        }

        Self::new(label.into(), rules)
    }
}

/// Parse a bare declaration list (an inline `style` attribute).
pub(crate) fn parse_declarations(css: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut declarations = Vec::new();

    let mut decl_parser = DeclarationListParser {
        declarations: &mut declarations,
    };
    for result in RuleBodyParser::new(&mut parser, &mut decl_parser) {
        let _ = result;
    }

    declarations
}

/// Parser for top-level stylesheet rules.
struct TopLevelRuleParser<'a> {
    rules: &'a mut Vec<SheetRule>,
}

impl<'i> AtRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = String;
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        // The prelude itself is not evaluated.
        while input.next().is_ok() {}
        Ok(name.to_string())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        // At-rule bodies are not evaluated; the tagged record is kept so
        // scans can tell the rule kinds apart.
        while input.next().is_ok() {}
        self.rules.push(SheetRule::At { name: prelude });
        Ok(())
    }
}

impl<'i> QualifiedRuleParser<'i> for TopLevelRuleParser<'_> {
    type Prelude = (String, Vec<Selector<InspectorSelectors>>);
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let location = input.current_source_location();
        let start = input.position();
        let list = SelectorList::parse(&InspectorSelectors, input, ParseRelative::No)
            .map_err(|_| location.new_custom_error(()))?;
        let text = input.slice_from(start).to_string();
        Ok((text, list.slice().to_vec()))
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let (text, compiled) = prelude;

        let mut texts = split_selector_list(&text);
        if texts.len() != compiled.len() {
            // Shouldn't happen; fall back to the whole prelude per selector.
            texts = vec![text.trim().to_string(); compiled.len()];
        }
        let selectors = texts
            .into_iter()
            .zip(compiled)
            .map(|(text, compiled)| RuleSelector::new(text, compiled))
            .collect();

        let mut declarations = Vec::new();
        let mut decl_parser = DeclarationListParser {
            declarations: &mut declarations,
        };
        for result in RuleBodyParser::new(input, &mut decl_parser) {
            // Ignore errors - lenient parsing
            let _ = result;
        }

        self.rules.push(SheetRule::Style(StyleRule {
            selectors,
            declarations,
        }));

        Ok(())
    }
}

/// Split a selector list on top-level commas, honoring parentheses,
/// brackets, and quoted strings.
fn split_selector_list(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth = depth.saturating_sub(1),
            b'"' | b'\'' => {
                let quote = bytes[pos];
                pos += 1;
                while pos < bytes.len() && bytes[pos] != quote {
                    if bytes[pos] == b'\\' {
                        pos += 1;
                    }
                    pos += 1;
                }
            }
            b',' if depth == 0 => {
                parts.push(text[start..pos].trim().to_string());
                start = pos + 1;
            }
            _ => {}
        }
        pos += 1;
    }
    parts.push(text[start..].trim().to_string());
    parts
}

struct DeclarationListParser<'a> {
    declarations: &'a mut Vec<Declaration>,
}

impl<'i> cssparser::AtRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type AtRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        _name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> cssparser::QualifiedRuleParser<'i> for DeclarationListParser<'_> {
    type Prelude = ();
    type QualifiedRule = ();
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }

    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _start: &cssparser::ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        Err(input.new_custom_error(()))
    }
}

impl<'i> cssparser::DeclarationParser<'i> for DeclarationListParser<'_> {
    type Declaration = ();
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: cssparser::CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &cssparser::ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let start = input.position();
        while input.next().is_ok() {}
        let (value, important) = split_important(input.slice_from(start));
        if !value.is_empty() {
            self.declarations.push(Declaration {
                property: name.to_ascii_lowercase(),
                value,
                important,
            });
        }
        Ok(())
    }
}

impl<'i> RuleBodyItemParser<'i, (), ()> for DeclarationListParser<'_> {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Strip a trailing `!important` from raw declaration value text.
fn split_important(raw: &str) -> (String, bool) {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    if let Some(without_kw) = lower.strip_suffix("important") {
        let without_ws = without_kw.trim_end();
        if let Some(without_bang) = without_ws.strip_suffix('!') {
            return (trimmed[..without_bang.len()].trim_end().to_string(), true);
        }
    }
    (trimmed.to_string(), false)
}
