// src/method_extractor/java.rs
use tree_sitter::{Language, Node, Parser};

use crate::errors::ExtractError;
use crate::method_extractor::core::{
    CompilationUnit, Member, MethodDecl, SourceParser, TypeDecl, TypeKind,
};

// Java语言解析器
pub fn get_tree_sitter_java() -> Language {
    tree_sitter_java::language()
}

/// Grammar-based parser backed by tree-sitter-java.
///
/// A fresh `tree_sitter::Parser` is built per call, so one instance can be
/// shared across the rayon pool. Trees containing error or missing nodes are
/// rejected rather than partially extracted.
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterJavaParser;

impl TreeSitterJavaParser {
    pub fn new() -> Result<Self, ExtractError> {
        // Surface ABI mismatches once, up front, instead of on every file.
        new_parser()?;
        Ok(Self)
    }
}

fn new_parser() -> Result<Parser, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(get_tree_sitter_java())
        .map_err(|e| ExtractError::Language(format!("Failed to set Java language for parser: {}", e)))?;
    Ok(parser)
}

impl SourceParser for TreeSitterJavaParser {
    fn name(&self) -> &'static str {
        "tree-sitter"
    }

    fn parse(&self, source: &str) -> Result<CompilationUnit, ExtractError> {
        let mut parser = new_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ExtractError::Parse("tree-sitter produced no tree".to_string()))?;

        let root_node = tree.root_node();
        if root_node.has_error() {
            return Err(ExtractError::Parse(describe_syntax_error(root_node)));
        }

        let source_bytes = source.as_bytes();
        let mut types = Vec::new();
        let mut cursor = root_node.walk();
        for child in root_node.named_children(&mut cursor) {
            if let Some(type_decl) = type_decl_from_node(child, source_bytes)? {
                types.push(type_decl);
            }
        }
        Ok(CompilationUnit { types })
    }
}

fn type_kind_of(node_kind: &str) -> Option<TypeKind> {
    match node_kind {
        "class_declaration" => Some(TypeKind::Class),
        "interface_declaration" => Some(TypeKind::Interface),
        "enum_declaration" => Some(TypeKind::Enum),
        "record_declaration" => Some(TypeKind::Record),
        "annotation_type_declaration" => Some(TypeKind::Annotation),
        _ => None,
    }
}

fn type_decl_from_node(node: Node, source: &[u8]) -> Result<Option<TypeDecl>, ExtractError> {
    let Some(kind) = type_kind_of(node.kind()) else {
        return Ok(None);
    };
    let name = node_name(node, source)?;
    let mut members = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        collect_body_members(body, source, &mut members)?;
    }
    Ok(Some(TypeDecl { name, kind, members }))
}

/// Walks the direct children of a type body. Method bodies, field initializers
/// and enum constant bodies are never entered, which keeps anonymous and local
/// classes out of the result.
fn collect_body_members(body: Node, source: &[u8], members: &mut Vec<Member>) -> Result<(), ExtractError> {
    let mut cursor = body.walk();
    for child in body.named_children(&mut cursor) {
        match child.kind() {
            "method_declaration" | "annotation_type_element_declaration" => {
                members.push(Member::Method(method_decl_from_node(child, source, false)?));
            }
            "constructor_declaration" | "compact_constructor_declaration" => {
                members.push(Member::Method(method_decl_from_node(child, source, true)?));
            }
            // Enum members live after the constant list
            "enum_body_declarations" => collect_body_members(child, source, members)?,
            _ => {
                if let Some(nested) = type_decl_from_node(child, source)? {
                    members.push(Member::Type(nested));
                }
            }
        }
    }
    Ok(())
}

fn method_decl_from_node(node: Node, source: &[u8], is_constructor: bool) -> Result<MethodDecl, ExtractError> {
    let name = node_name(node, source)?;
    let body = match node.child_by_field_name("body") {
        Some(body_node) => Some(node_text(body_node, source)?.to_string()),
        None => None,
    };
    Ok(MethodDecl {
        name,
        body,
        is_constructor,
    })
}

fn node_name(node: Node, source: &[u8]) -> Result<String, ExtractError> {
    let name_node = node.child_by_field_name("name").ok_or_else(|| {
        ExtractError::Parse(format!(
            "{} at line {} has no name",
            node.kind(),
            node.start_position().row + 1
        ))
    })?;
    Ok(node_text(name_node, source)?.to_string())
}

fn node_text<'s>(node: Node, source: &'s [u8]) -> Result<&'s str, ExtractError> {
    node.utf8_text(source)
        .map_err(|e| ExtractError::Parse(format!("invalid UTF-8 in {}: {}", node.kind(), e)))
}

fn first_error_node(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error_node)
}

fn describe_syntax_error(root: Node) -> String {
    match first_error_node(root) {
        Some(node) if node.is_missing() => format!(
            "missing {} at line {}, column {}",
            node.kind(),
            node.start_position().row + 1,
            node.start_position().column + 1
        ),
        Some(node) => format!(
            "syntax error at line {}, column {}",
            node.start_position().row + 1,
            node.start_position().column + 1
        ),
        None => "syntax error".to_string(),
    }
}
