//! Collects the paths a source file depends on, resolved against the file's
//! own module path.

use std::path::Path;

use syn::visit::{self, Visit};

/// Where a referenced path points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A top-level module of the linted crate.
    Module(String),
    /// An external crate.
    Crate(String),
}

/// A dependency and the line it first appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub target: Target,
    pub line: usize,
}

/// Module path of a file relative to `src/`, e.g. `outbound/viacep/mod.rs`
/// becomes `["outbound", "viacep"]`.
pub fn module_path(relative_path: &Path) -> Vec<String> {
    let mut segments: Vec<String> = relative_path
        .iter()
        .filter_map(|part| part.to_str())
        .map(|part| part.trim_end_matches(".rs").to_owned())
        .collect();
    if segments.last().is_some_and(|last| last == "mod") {
        segments.pop();
    }
    segments
}

/// Production dependencies of `file`. Items gated on `#[cfg(test)]` are
/// skipped.
pub fn collect(crate_name: &str, module: &[String], file: &syn::File) -> Vec<Dependency> {
    let mut collector = Collector {
        crate_name,
        module: module.to_vec(),
        found: Vec::new(),
    };
    collector.visit_file(file);
    collector.found
}

struct Collector<'a> {
    crate_name: &'a str,
    module: Vec<String>,
    found: Vec<Dependency>,
}

impl Collector<'_> {
    fn record(&mut self, segments: &[String], line: usize) {
        if let Some(target) = self.resolve(segments) {
            self.found.push(Dependency { target, line });
        }
    }

    /// Root of an absolute or relative path. Single-segment paths are local
    /// names and resolve to nothing.
    fn resolve(&self, segments: &[String]) -> Option<Target> {
        let (first, rest) = segments.split_first()?;
        match first.as_str() {
            "crate" => rest.first().cloned().map(Target::Module),
            name if name == self.crate_name => rest.first().cloned().map(Target::Module),
            "self" | "super" => {
                let mut module = self.module.clone();
                let mut remaining = segments.iter().peekable();
                while let Some(segment) = remaining.next_if(|s| *s == "self" || *s == "super") {
                    if segment == "super" {
                        module.pop();
                    }
                }
                module
                    .first()
                    .cloned()
                    .or_else(|| remaining.next().cloned())
                    .map(Target::Module)
            }
            _ if rest.is_empty() => None,
            _ => Some(Target::Crate(first.clone())),
        }
    }

    fn record_use_tree(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>, line: usize) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.record_use_tree(&path.tree, prefix, line);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                prefix.push(ident.to_string());
                let segments = prefix.clone();
                prefix.pop();
                self.record(&segments, line);
            }
            syn::UseTree::Glob(_) => {
                prefix.push("*".to_owned());
                let segments = prefix.clone();
                prefix.pop();
                self.record(&segments, line);
            }
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.record_use_tree(item, prefix, line);
                }
            }
        }
    }
}

impl<'ast> Visit<'ast> for Collector<'_> {
    fn visit_item(&mut self, node: &'ast syn::Item) {
        if item_attrs(node).iter().any(is_cfg_test) {
            return;
        }
        visit::visit_item(self, node);
    }

    fn visit_item_mod(&mut self, node: &'ast syn::ItemMod) {
        let inline = node.content.is_some();
        if inline {
            self.module.push(node.ident.to_string());
        }
        visit::visit_item_mod(self, node);
        if inline {
            self.module.pop();
        }
    }

    fn visit_impl_item_fn(&mut self, node: &'ast syn::ImplItemFn) {
        if node.attrs.iter().any(is_cfg_test) {
            return;
        }
        visit::visit_impl_item_fn(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        let line = node.use_token.span.start().line;
        self.record_use_tree(&node.tree, &mut Vec::new(), line);
    }

    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        let line = node
            .segments
            .first()
            .map_or(0, |segment| segment.ident.span().start().line);
        self.record(&segments, line);
        visit::visit_path(self, node);
    }
}

fn is_cfg_test(attr: &syn::Attribute) -> bool {
    attr.path().is_ident("cfg")
        && attr
            .parse_args::<syn::Ident>()
            .is_ok_and(|ident| ident == "test")
}

fn item_attrs(item: &syn::Item) -> &[syn::Attribute] {
    match item {
        syn::Item::Const(item) => &item.attrs,
        syn::Item::Enum(item) => &item.attrs,
        syn::Item::ExternCrate(item) => &item.attrs,
        syn::Item::Fn(item) => &item.attrs,
        syn::Item::ForeignMod(item) => &item.attrs,
        syn::Item::Impl(item) => &item.attrs,
        syn::Item::Macro(item) => &item.attrs,
        syn::Item::Mod(item) => &item.attrs,
        syn::Item::Static(item) => &item.attrs,
        syn::Item::Struct(item) => &item.attrs,
        syn::Item::Trait(item) => &item.attrs,
        syn::Item::TraitAlias(item) => &item.attrs,
        syn::Item::Type(item) => &item.attrs,
        syn::Item::Union(item) => &item.attrs,
        syn::Item::Use(item) => &item.attrs,
        _ => &[],
    }
}
