//! Assembling the per-document model from symbols and source text.

use std::sync::Arc;

use docket_core::{
    Authorship, DeclarationKind, DeclarationSymbol, DocumentId, DocumentModel, EnumConstantDoc,
    FieldDoc, LeafDeclaration, MethodDoc, MethodKind, ModelSource, TagTable, Visibility,
};
use docket_symbols::{NoRevisions, RevisionProvider, SymbolCache};

use crate::ParserError;
use crate::comment::{DocComment, locate_comment};
use crate::fallback::{find_container, find_package};
use crate::flatten::flatten;
use crate::members::{enum_arguments, field_type, is_constant};
use crate::scanner::{LexState, scan_line};
use crate::signature::{DEFAULT_MAX_SIGNATURE_LINES, Signature, extract_signature};
use crate::syntax::strip_leading_annotations;
use crate::tags::parse_tags;

/// Limits and heuristics injected into every parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Most lines a single signature may span.
    pub max_signature_lines: usize,
    /// Prefer the container named like the file over the first one.
    pub prefer_file_name_container: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_signature_lines: DEFAULT_MAX_SIGNATURE_LINES,
            prefer_file_name_container: true,
        }
    }
}

/// Entry point for the rendering layer: symbols in, [`DocumentModel`] out.
pub struct DocumentParser {
    symbols: SymbolCache,
    revisions: Arc<dyn RevisionProvider>,
    options: ParserOptions,
}

impl DocumentParser {
    #[must_use]
    pub fn new(symbols: SymbolCache) -> Self {
        Self {
            symbols,
            revisions: Arc::new(NoRevisions),
            options: ParserOptions::default(),
        }
    }

    #[must_use]
    pub fn with_revisions(mut self, revisions: Arc<dyn RevisionProvider>) -> Self {
        self.revisions = revisions;
        self
    }

    #[must_use]
    pub const fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn symbols(&self) -> &SymbolCache {
        &self.symbols
    }

    /// Forget cached symbols of a closed document.
    pub fn invalidate(&self, document: &DocumentId) {
        self.symbols.invalidate(document);
    }

    pub fn invalidate_all(&self) {
        self.symbols.invalidate_all();
    }

    /// Build the documentation model of `document` from its full `text`.
    ///
    /// Never fails. Lookup failures, unusable declarations and revision
    /// errors only make the model poorer; each is logged.
    pub async fn parse(&self, document: &DocumentId, text: &str) -> DocumentModel {
        let symbols = self.symbols.resolve(document).await;
        let mut model = build_model(document, text, &symbols, &self.options);
        if let Some(line) = model.container_line {
            model.authorship = self.authorship(document, line).await;
        }
        tracing::debug!(
            %document,
            methods = model.methods.len(),
            fields = model.fields.len(),
            enum_constants = model.enum_constants.len(),
            "parsed document"
        );
        model
    }

    async fn authorship(&self, document: &DocumentId, line: u32) -> Option<Authorship> {
        let path = document.path();
        match self.revisions.is_under_version_control(path).await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(error) => {
                tracing::warn!(%document, %error, "revision control check failed");
                return None;
            }
        }
        self.revisions
            .authorship(path, line)
            .await
            .unwrap_or_else(|error| {
                tracing::warn!(%document, %error, "authorship lookup failed");
                None
            })
    }
}

/// Build a model from already-resolved symbols. Pure and synchronous.
#[must_use]
pub fn build_model(
    document: &DocumentId,
    text: &str,
    symbols: &[DeclarationSymbol],
    options: &ParserOptions,
) -> DocumentModel {
    let lines: Vec<&str> = text.lines().collect();
    let base_name = document.base_name();

    let (container_name, container_line, source) =
        match primary_container(symbols, base_name, options.prefer_file_name_container) {
            Some(container) => (
                container.bare_name().to_string(),
                Some(container.start_line()),
                ModelSource::Symbols,
            ),
            None => {
                tracing::debug!(%document, symbols = symbols.len(), "no container symbol, scanning text");
                let container =
                    find_container(&lines, base_name, options.prefer_file_name_container);
                (container.name, container.line, ModelSource::TextFallback)
            }
        };

    let mut model = DocumentModel::empty(document.clone(), container_name);
    model.package_name = find_package(&lines);
    model.container_line = container_line;
    model.source = source;

    let container_comment = container_line.and_then(|line| locate_comment(&lines, line as usize));
    if let Some(block) = &container_comment {
        let doc = DocComment::parse(&block.text);
        let tags = parse_tags(&doc.tag_section, None);
        model.has_comment = true;
        model.description = doc.description;
        model.author = tags.author;
        model.since = tags.since;
    }

    let extraction = Extraction {
        lines: &lines,
        options,
        container_comment: container_comment.as_ref().map(|block| block.text.as_str()),
    };
    for leaf in flatten(symbols) {
        match extraction.member(&leaf) {
            Ok(Member::Method(method)) => model.methods.push(method),
            Ok(Member::Field(field)) => model.fields.push(field),
            Ok(Member::EnumConstant(constant)) => model.enum_constants.push(constant),
            Err(error) => {
                tracing::warn!(%document, name = leaf.symbol.bare_name(), %error, "dropping declaration");
            }
        }
    }

    model.sort_members();
    model
}

/// The top-level container named like the file, else the first one.
fn primary_container<'a>(
    symbols: &'a [DeclarationSymbol],
    base_name: &str,
    prefer_base_name: bool,
) -> Option<&'a DeclarationSymbol> {
    let mut containers = symbols.iter().filter(|symbol| symbol.kind.is_container());
    if prefer_base_name {
        if let Some(named) = containers
            .clone()
            .find(|symbol| symbol.bare_name() == base_name)
        {
            return Some(named);
        }
    }
    containers.next()
}

enum Member {
    Method(MethodDoc),
    Field(FieldDoc),
    EnumConstant(EnumConstantDoc),
}

struct Extraction<'a> {
    lines: &'a [&'a str],
    options: &'a ParserOptions,
    container_comment: Option<&'a str>,
}

impl Extraction<'_> {
    fn member(&self, leaf: &LeafDeclaration) -> Result<Member, ParserError> {
        let kind = leaf.symbol.kind;
        tracing::trace!(name = leaf.symbol.bare_name(), %kind, owner = %leaf.owner, "extracting declaration");
        if kind.is_callable() {
            self.method(leaf).map(Member::Method)
        } else if kind.is_enum_constant() {
            self.enum_constant(leaf).map(Member::EnumConstant)
        } else {
            self.field(leaf).map(Member::Field)
        }
    }

    fn method(&self, leaf: &LeafDeclaration) -> Result<MethodDoc, ParserError> {
        let symbol = &leaf.symbol;
        let name = symbol.bare_name().to_string();
        let start_line = symbol.start_line();

        let text = extract_signature(
            self.lines,
            start_line as usize,
            self.options.max_signature_lines,
        )?;
        let mut signature = Signature::parse(text);
        if !signature.has_parameter_list() {
            return Err(ParserError::ExtractionFailed {
                name,
                message: "no parameter list found".to_string(),
            });
        }

        let kind = if symbol.kind == DeclarationKind::Constructor
            || (signature.return_type.is_none() && name == leaf.owner_simple_name())
        {
            signature.return_type = None;
            MethodKind::Constructor
        } else {
            MethodKind::Method
        };

        let (has_comment, description, tags) = match self.member_comment(start_line) {
            Some(doc) => (
                true,
                doc.description,
                parse_tags(&doc.tag_section, Some(&signature)),
            ),
            None => (false, String::new(), TagTable::default()),
        };

        Ok(MethodDoc {
            id: MethodDoc::make_id(&name, start_line),
            kind,
            display_signature: signature.display(&name),
            visibility: Visibility::from_declaration(strip_leading_annotations(&signature.text)),
            signature: signature.text,
            parameters: signature.parameters,
            return_type: signature.return_type,
            start_line,
            end_line: symbol.end_line(),
            has_comment,
            description,
            tags,
            owner: leaf.owner.clone(),
            name,
        })
    }

    fn field(&self, leaf: &LeafDeclaration) -> Result<FieldDoc, ParserError> {
        let symbol = &leaf.symbol;
        let start_line = symbol.start_line();
        let line = self.line(start_line)?;
        let (has_comment, description) = self.description(start_line);

        Ok(FieldDoc {
            name: symbol.bare_name().to_string(),
            type_name: field_type(line),
            declaration: line.trim().to_string(),
            start_line,
            has_comment,
            description,
            is_constant: symbol.kind == DeclarationKind::Constant || is_constant(line),
            visibility: Visibility::from_declaration(&scan_line(line, LexState::default()).code),
            owner: leaf.owner.clone(),
        })
    }

    fn enum_constant(&self, leaf: &LeafDeclaration) -> Result<EnumConstantDoc, ParserError> {
        let symbol = &leaf.symbol;
        let start_line = symbol.start_line();
        let line = self.line(start_line)?;
        let (has_comment, description) = self.description(start_line);

        Ok(EnumConstantDoc {
            name: symbol.bare_name().to_string(),
            start_line,
            has_comment,
            description,
            arguments: enum_arguments(line),
            owner: leaf.owner.clone(),
        })
    }

    fn line(&self, line: u32) -> Result<&str, ParserError> {
        self.lines
            .get(line as usize)
            .copied()
            .ok_or(ParserError::LineOutOfRange {
                line: line as usize,
                line_count: self.lines.len(),
            })
    }

    fn description(&self, line: u32) -> (bool, String) {
        self.member_comment(line)
            .map_or((false, String::new()), |doc| (true, doc.description))
    }

    /// Comment above a member, unless it is the container's own comment.
    fn member_comment(&self, line: u32) -> Option<DocComment> {
        let block = locate_comment(self.lines, line as usize)?;
        if self.container_comment == Some(block.text.as_str()) {
            tracing::trace!(line, "member comment repeats the container comment, ignoring");
            return None;
        }
        Some(DocComment::parse(&block.text))
    }
}

#[cfg(test)]
mod tests {
    use docket_core::Range;
    use pretty_assertions::assert_eq;

    use super::*;

    const SOURCE: &str = "\
package com.example;

/**
 * Order aggregate.
 * @author Ada
 * @since 2.1
 */
public class Order {
    private int total;

    /** Creates an order. */
    public Order() {
    }
}";

    fn symbol(name: &str, kind: DeclarationKind, start: u32, end: u32) -> DeclarationSymbol {
        DeclarationSymbol::new(name, kind, Range::lines(start, end))
    }

    fn document() -> DocumentId {
        DocumentId::new("file:///src/com/example/Order.java")
    }

    #[test]
    fn container_documentation_and_package() {
        let symbols = vec![symbol("Order", DeclarationKind::Class, 7, 13)];
        let model = build_model(&document(), SOURCE, &symbols, &ParserOptions::default());

        assert_eq!(model.container_name, "Order");
        assert_eq!(model.container_line, Some(7));
        assert_eq!(model.package_name.as_deref(), Some("com.example"));
        assert!(model.has_comment);
        assert_eq!(model.description, "Order aggregate.");
        assert_eq!(model.author.as_deref(), Some("Ada"));
        assert_eq!(model.since.as_deref(), Some("2.1"));
        assert_eq!(model.source, ModelSource::Symbols);
    }

    #[test]
    fn constructor_detected_by_owner_name() {
        let symbols = vec![
            symbol("Order", DeclarationKind::Class, 7, 13).with_children(vec![
                symbol("total", DeclarationKind::Field, 8, 8),
                symbol("Order()", DeclarationKind::Method, 11, 12),
            ]),
        ];
        let model = build_model(&document(), SOURCE, &symbols, &ParserOptions::default());

        assert_eq!(model.methods.len(), 1);
        let constructor = &model.methods[0];
        assert_eq!(constructor.kind, MethodKind::Constructor);
        assert_eq!(constructor.id, "Order:11");
        assert_eq!(constructor.display_signature, "Order()");
        assert_eq!(constructor.description, "Creates an order.");
        assert_eq!(constructor.visibility, Visibility::Public);

        let field = &model.fields[0];
        assert_eq!(field.type_name, "int");
        assert_eq!(field.visibility, Visibility::Private);
        assert!(!field.has_comment);
    }

    #[test]
    fn unusable_declarations_are_dropped() {
        let symbols = vec![
            symbol("Order", DeclarationKind::Class, 7, 13).with_children(vec![
                symbol("ghost", DeclarationKind::Field, 40, 40),
                symbol("close", DeclarationKind::Method, 12, 12),
                symbol("Order()", DeclarationKind::Constructor, 11, 12),
            ]),
        ];
        let model = build_model(&document(), SOURCE, &symbols, &ParserOptions::default());
        assert!(model.fields.is_empty());
        assert_eq!(model.methods.len(), 1);
        assert_eq!(model.methods[0].name, "Order");
    }

    #[test]
    fn no_symbols_falls_back_to_text() {
        let model = build_model(&document(), SOURCE, &[], &ParserOptions::default());
        assert_eq!(model.source, ModelSource::TextFallback);
        assert_eq!(model.container_name, "Order");
        assert_eq!(model.container_line, Some(7));
        assert_eq!(model.description, "Order aggregate.");
        assert!(model.methods.is_empty());
    }

    #[test]
    fn primary_container_prefers_the_file_name() {
        let symbols = vec![
            symbol("Helper", DeclarationKind::Class, 0, 1),
            symbol("Order", DeclarationKind::Class, 7, 13),
        ];
        assert_eq!(
            primary_container(&symbols, "Order", true).map(|s| s.name.as_str()),
            Some("Order")
        );
        assert_eq!(
            primary_container(&symbols, "Order", false).map(|s| s.name.as_str()),
            Some("Helper")
        );
        assert!(primary_container(&[], "Order", true).is_none());
    }
}
