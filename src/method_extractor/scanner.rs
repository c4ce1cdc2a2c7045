//! Conservative Java structure scanner.
//!
//! Tokenizes just enough of the language to find type bodies and member
//! declarations. Comments and string, character and text-block literals are
//! consumed whole, so braces inside them never affect depth. All `{}`, `()` and
//! `[]` pairs are matched once up front; member recognition then works on
//! token ranges and jumps over method bodies without looking inside them.

use crate::errors::ExtractError;
use crate::method_extractor::core::{
    CompilationUnit, Member, MethodDecl, SourceParser, TypeDecl, TypeKind,
};

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "abstract",
    "native",
    "synchronized",
    "transient",
    "volatile",
    "strictfp",
    "default",
    "sealed",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Word,
    Literal,
    Punct(u8),
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    start: usize,
    end: usize,
}

/// Token and brace scanner; selectable as `parser = "scanner"`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BraceScanner;

impl SourceParser for BraceScanner {
    fn name(&self) -> &'static str {
        "scanner"
    }

    fn parse(&self, source: &str) -> Result<CompilationUnit, ExtractError> {
        let source = source.strip_prefix('\u{feff}').unwrap_or(source);
        let tokens = tokenize(source)?;
        let pairs = match_delimiters(source, &tokens)?;
        let scan = Scan {
            source,
            tokens: &tokens,
            pairs: &pairs,
        };
        let types = scan
            .members(0, tokens.len(), None)?
            .into_iter()
            .filter_map(|member| match member {
                Member::Type(type_decl) => Some(type_decl),
                Member::Method(_) => None,
            })
            .collect();
        Ok(CompilationUnit { types })
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

fn unterminated(what: &str, source: &str, start: usize) -> ExtractError {
    ExtractError::Parse(format!("unterminated {} starting at line {}", what, line_of(source, start)))
}

fn is_word_byte(b: u8) -> bool {
    // Non-ASCII bytes only occur in identifiers once comments and literals are gone.
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

fn tokenize(source: &str) -> Result<Vec<Token>, ExtractError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = bytes[i..]
                    .iter()
                    .position(|&c| c == b'\n')
                    .map_or(bytes.len(), |p| i + p);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = bytes[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map(|p| i + 2 + p + 2)
                    .ok_or_else(|| unterminated("block comment", source, start))?;
            }
            b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                i = skip_text_block(bytes, i + 3).ok_or_else(|| unterminated("text block", source, start))?;
                tokens.push(Token { kind: TokenKind::Literal, start, end: i });
            }
            b'"' | b'\'' => {
                let what = if b == b'"' { "string literal" } else { "character literal" };
                i = skip_quoted(bytes, i + 1, b).ok_or_else(|| unterminated(what, source, start))?;
                tokens.push(Token { kind: TokenKind::Literal, start, end: i });
            }
            _ if is_word_byte(b) => {
                while i < bytes.len() && is_word_byte(bytes[i]) {
                    i += 1;
                }
                tokens.push(Token { kind: TokenKind::Word, start, end: i });
            }
            _ => {
                i += 1;
                tokens.push(Token { kind: TokenKind::Punct(b), start, end: i });
            }
        }
    }
    Ok(tokens)
}

/// Returns the index just past the closing quote.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> Option<usize> {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            c if c == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

fn skip_text_block(bytes: &[u8], mut i: usize) -> Option<usize> {
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i..].starts_with(b"\"\"\"") {
            return Some(i + 3);
        }
        i += 1;
    }
    None
}

fn closer_for(open: u8) -> u8 {
    match open {
        b'{' => b'}',
        b'(' => b')',
        _ => b']',
    }
}

/// For every opening delimiter, the index of its closing partner.
fn match_delimiters(source: &str, tokens: &[Token]) -> Result<Vec<Option<usize>>, ExtractError> {
    let mut pairs = vec![None; tokens.len()];
    let mut stack: Vec<(usize, u8)> = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        let TokenKind::Punct(c) = token.kind else {
            continue;
        };
        match c {
            b'{' | b'(' | b'[' => stack.push((idx, c)),
            b'}' | b')' | b']' => {
                let (open_idx, open) = stack.pop().ok_or_else(|| {
                    ExtractError::Parse(format!(
                        "unexpected '{}' at line {}",
                        c as char,
                        line_of(source, token.start)
                    ))
                })?;
                if closer_for(open) != c {
                    return Err(ExtractError::Parse(format!(
                        "'{}' at line {} closes '{}' opened at line {}",
                        c as char,
                        line_of(source, token.start),
                        open as char,
                        line_of(source, tokens[open_idx].start)
                    )));
                }
                pairs[open_idx] = Some(idx);
            }
            _ => {}
        }
    }

    if let Some(&(open_idx, open)) = stack.last() {
        return Err(ExtractError::Parse(format!(
            "'{}' opened at line {} is never closed",
            open as char,
            line_of(source, tokens[open_idx].start)
        )));
    }
    Ok(pairs)
}

struct Scan<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pairs: &'a [Option<usize>],
}

impl<'a> Scan<'a> {
    fn text(&self, idx: usize) -> &'a str {
        let token = self.tokens[idx];
        &self.source[token.start..token.end]
    }

    fn is_punct(&self, idx: usize, c: u8) -> bool {
        self.tokens
            .get(idx)
            .is_some_and(|t| t.kind == TokenKind::Punct(c))
    }

    fn is_word(&self, idx: usize) -> bool {
        self.tokens.get(idx).is_some_and(|t| t.kind == TokenKind::Word)
    }

    fn is_keyword(&self, idx: usize, keyword: &str) -> bool {
        self.is_word(idx) && self.text(idx) == keyword
    }

    fn is_modifier(&self, idx: usize) -> bool {
        self.is_word(idx) && MODIFIERS.contains(&self.text(idx))
    }

    fn error_at(&self, idx: usize, what: &str) -> ExtractError {
        let offset = self.tokens.get(idx).map_or(self.source.len(), |t| t.start);
        ExtractError::Parse(format!("{} at line {}", what, line_of(self.source, offset)))
    }

    fn close_of(&self, open_idx: usize) -> Result<usize, ExtractError> {
        self.pairs[open_idx].ok_or_else(|| self.error_at(open_idx, "unmatched delimiter"))
    }

    /// Index just past the group opened at `idx`, or the next index for any other token.
    fn skip(&self, idx: usize) -> usize {
        self.pairs[idx].map_or(idx + 1, |close| close + 1)
    }

    /// Token indices at the current nesting level; a group is represented by its opener.
    fn top_level(&self, start: usize, end: usize) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut i = start;
        while i < end {
            indices.push(i);
            i = self.skip(i);
        }
        indices
    }

    fn find_semicolon(&self, start: usize, end: usize) -> Option<usize> {
        let mut i = start;
        while i < end {
            if self.is_punct(i, b';') {
                return Some(i);
            }
            i = self.skip(i);
        }
        None
    }

    /// The verbatim text from the opener at `open` through its closer at `close`.
    fn span(&self, open: usize, close: usize) -> String {
        self.source[self.tokens[open].start..self.tokens[close].end].to_string()
    }

    /// Drops annotations (`@Name`, `@a.b.Name(...)`) from a header, keeping `@interface`.
    fn strip_annotations(&self, header: &[usize]) -> Vec<usize> {
        let mut kept = Vec::with_capacity(header.len());
        let mut k = 0;
        while k < header.len() {
            let idx = header[k];
            let annotation = self.is_punct(idx, b'@')
                && !header.get(k + 1).is_some_and(|&next| self.is_keyword(next, "interface"));
            if !annotation {
                kept.push(idx);
                k += 1;
                continue;
            }
            k += 1;
            if k < header.len() && self.is_word(header[k]) {
                k += 1;
                while k + 1 < header.len() && self.is_punct(header[k], b'.') && self.is_word(header[k + 1]) {
                    k += 2;
                }
            }
            if k < header.len() && self.is_punct(header[k], b'(') {
                k += 1;
            }
        }
        kept
    }

    /// Finds `class X`, `interface X`, `@interface X`, `enum X` or `record X(` in a header.
    fn type_header(&self, sig: &[usize]) -> Option<(TypeKind, usize)> {
        for (k, &idx) in sig.iter().enumerate() {
            let Some(&name_idx) = sig.get(k + 1).filter(|&&n| self.is_word(n)) else {
                continue;
            };
            let kind = if self.is_keyword(idx, "class") {
                TypeKind::Class
            } else if self.is_keyword(idx, "interface") {
                if k > 0 && self.is_punct(sig[k - 1], b'@') {
                    TypeKind::Annotation
                } else {
                    TypeKind::Interface
                }
            } else if self.is_keyword(idx, "enum") {
                TypeKind::Enum
            } else if self.is_keyword(idx, "record")
                && sig
                    .get(k + 2)
                    .is_some_and(|&after| self.is_punct(after, b'(') || self.is_punct(after, b'<'))
            {
                TypeKind::Record
            } else {
                continue;
            };
            return Some((kind, name_idx));
        }
        None
    }

    /// Position in `sig` of the method name: the word right before the first `(` group.
    fn method_name_pos(&self, sig: &[usize]) -> Option<usize> {
        let paren = sig.iter().position(|&idx| self.is_punct(idx, b'('))?;
        (paren > 0 && self.is_word(sig[paren - 1])).then(|| paren - 1)
    }

    /// True when only modifiers and type parameters precede the name, i.e. there is no return type.
    fn is_constructor_prefix(&self, before_name: &[usize]) -> bool {
        let mut k = 0;
        while k < before_name.len() {
            let idx = before_name[k];
            if self.is_modifier(idx) {
                k += 1;
            } else if self.is_punct(idx, b'<') {
                let mut depth = 0usize;
                while k < before_name.len() {
                    if self.is_punct(before_name[k], b'<') {
                        depth += 1;
                    } else if self.is_punct(before_name[k], b'>') {
                        depth = depth.saturating_sub(1);
                    }
                    k += 1;
                    if depth == 0 {
                        break;
                    }
                }
            } else {
                return false;
            }
        }
        true
    }

    fn is_compact_constructor(&self, sig: &[usize], owner_name: &str) -> bool {
        let rest: Vec<usize> = sig.iter().copied().filter(|&idx| !self.is_modifier(idx)).collect();
        rest.len() == 1 && self.is_word(rest[0]) && self.text(rest[0]) == owner_name
    }

    /// Parses member declarations in `[start, end)`.
    ///
    /// With no owner (the compilation unit itself) only type declarations are kept.
    fn members(
        &self,
        start: usize,
        end: usize,
        owner: Option<(&str, TypeKind)>,
    ) -> Result<Vec<Member>, ExtractError> {
        let mut members = Vec::new();
        let mut i = start;

        while i < end {
            let mut j = i;
            let terminator = loop {
                if j >= end {
                    return Err(self.error_at(i, "unterminated declaration"));
                }
                if self.is_punct(j, b';') || self.is_punct(j, b'{') || self.is_punct(j, b'=') {
                    break j;
                }
                j = self.skip(j);
            };

            // Field with an initializer; anonymous classes and lambdas in it are skipped whole.
            if self.is_punct(terminator, b'=') {
                let semi = self
                    .find_semicolon(terminator, end)
                    .ok_or_else(|| self.error_at(terminator, "unterminated field initializer"))?;
                i = semi + 1;
                continue;
            }

            let header = self.top_level(i, terminator);
            let sig = self.strip_annotations(&header);
            let has_block = self.is_punct(terminator, b'{');

            if let Some((kind, name_idx)) = self.type_header(&sig) {
                if !has_block {
                    return Err(self.error_at(terminator, "type declaration without a body"));
                }
                let close = self.close_of(terminator)?;
                let name = self.text(name_idx).to_string();
                let mut body_start = terminator + 1;
                if kind == TypeKind::Enum {
                    // Members follow the constant list, after its `;`
                    body_start = self.find_semicolon(body_start, close).map_or(close, |semi| semi + 1);
                }
                let nested = self.members(body_start, close, Some((name.as_str(), kind)))?;
                members.push(Member::Type(TypeDecl {
                    name,
                    kind,
                    members: nested,
                }));
                i = close + 1;
                continue;
            }

            if let Some(name_pos) = self.method_name_pos(&sig) {
                let has_default_value = sig[name_pos + 1..]
                    .iter()
                    .any(|&idx| self.is_keyword(idx, "default"));
                let (body, next) = if has_default_value {
                    let semi = self
                        .find_semicolon(terminator, end)
                        .ok_or_else(|| self.error_at(terminator, "unterminated annotation element"))?;
                    (None, semi + 1)
                } else if has_block {
                    let close = self.close_of(terminator)?;
                    (Some(self.span(terminator, close)), close + 1)
                } else {
                    (None, terminator + 1)
                };
                if owner.is_some() {
                    members.push(Member::Method(MethodDecl {
                        name: self.text(sig[name_pos]).to_string(),
                        body,
                        is_constructor: self.is_constructor_prefix(&sig[..name_pos]),
                    }));
                }
                i = next;
                continue;
            }

            if has_block {
                // Initializer block, or a record's compact constructor.
                let close = self.close_of(terminator)?;
                if let Some((owner_name, TypeKind::Record)) = owner {
                    if self.is_compact_constructor(&sig, owner_name) {
                        members.push(Member::Method(MethodDecl {
                            name: owner_name.to_string(),
                            body: Some(self.span(terminator, close)),
                            is_constructor: true,
                        }));
                    }
                }
                i = close + 1;
                continue;
            }

            // Package, import, or a field without initializer.
            i = terminator + 1;
        }
        Ok(members)
    }
}
