use std::sync::Arc;

use scribe_core::extension::{Identified, NavigationProvider, NavigationTarget};
use scribe_core::vfs::VirtualFile;

/// Keywords that introduce a named item or binding
const DEFINITION_KEYWORDS: &[&str] = &[
    "fn", "struct", "enum", "trait", "type", "const", "static", "mod", "union", "macro_rules", "let",
];

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Resolves a Rust identifier to its definition in the same file.
///
/// This is a lexical search: the first item or binding with a matching name
/// wins, and comments and strings are not excluded.
#[derive(Debug, Default)]
pub struct RustDefinitionProvider;

impl RustDefinitionProvider {
    pub fn new() -> Self {
        Self
    }
}

/// The identifier under or directly before `offset`, with its char range
fn identifier_at(chars: &[char], offset: usize) -> Option<(usize, usize)> {
    if offset > chars.len() {
        return None;
    }
    let anchor = if offset < chars.len() && is_ident_char(chars[offset]) {
        offset
    } else if offset > 0 && is_ident_char(chars[offset - 1]) {
        offset - 1
    } else {
        return None;
    };

    let mut start = anchor;
    while start > 0 && is_ident_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = anchor + 1;
    while end < chars.len() && is_ident_char(chars[end]) {
        end += 1;
    }
    if chars[start].is_ascii_digit() {
        return None;
    }
    Some((start, end))
}

/// Words of the text with their starting char offset
fn words(chars: &[char]) -> Vec<(usize, String)> {
    let mut words = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if is_ident_char(chars[i]) {
            let start = i;
            while i < chars.len() && is_ident_char(chars[i]) {
                i += 1;
            }
            words.push((start, chars[start..i].iter().collect()));
        } else {
            i += 1;
        }
    }
    words
}

/// Char offset of the first definition of `name`
fn find_definition(chars: &[char], name: &str) -> Option<usize> {
    let words = words(chars);
    let mut previous: Option<&str> = None;
    for (start, word) in &words {
        if word == name && previous.is_some_and(|keyword| DEFINITION_KEYWORDS.contains(&keyword)) {
            return Some(*start);
        }
        // `let mut x` and `static mut X` bind the word after `mut`
        if word != "mut" {
            previous = Some(word.as_str());
        }
    }
    None
}

impl Identified for RustDefinitionProvider {
    fn id(&self) -> &str {
        "rust-definition"
    }
}

impl NavigationProvider for RustDefinitionProvider {
    fn supports(&self, file: &dyn VirtualFile) -> bool {
        !file.is_directory() && file.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("rs"))
    }

    fn goto_definition(
        &self,
        file: &Arc<dyn VirtualFile>,
        offset: usize,
        contents: &str,
    ) -> Option<NavigationTarget> {
        let chars: Vec<char> = contents.chars().collect();
        let (start, end) = identifier_at(&chars, offset)?;
        let name: String = chars[start..end].iter().collect();
        if DEFINITION_KEYWORDS.contains(&name.as_str()) {
            return None;
        }

        let definition = find_definition(&chars, &name)?;
        log::debug!("Resolved '{}' in {} to offset {}", name, file.path(), definition);
        Some(NavigationTarget::new(file.clone(), definition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::vfs::LocalVirtualFile;

    const SOURCE: &str = "struct Point { x: i32 }\n\nfn origin() -> Point {\n    let mut p = Point { x: 0 };\n    p.x = 1;\n    p\n}\n";

    fn offset_of(needle: &str, nth: usize) -> usize {
        let byte = SOURCE.match_indices(needle).nth(nth).unwrap().0;
        SOURCE[..byte].chars().count()
    }

    #[test]
    fn test_resolves_struct_usage_to_definition() {
        let provider = RustDefinitionProvider::new();
        let file = LocalVirtualFile::shared("/src/geometry.rs");

        let usage = offset_of("Point", 1);
        let target = provider.goto_definition(&file, usage + 2, SOURCE).unwrap();
        assert_eq!(target.offset(), offset_of("Point", 0));
        assert_eq!(target.file().path(), file.path());
    }

    #[test]
    fn test_resolves_let_mut_binding() {
        let provider = RustDefinitionProvider::new();
        let file = LocalVirtualFile::shared("/src/geometry.rs");

        let usage = offset_of("p.x", 0);
        let target = provider.goto_definition(&file, usage, SOURCE).unwrap();
        assert_eq!(target.offset(), offset_of("p =", 0));
    }

    #[test]
    fn test_cursor_just_after_identifier() {
        let provider = RustDefinitionProvider::new();
        let file = LocalVirtualFile::shared("/src/geometry.rs");

        let end_of_origin = offset_of("origin", 0) + "origin".len();
        let target = provider.goto_definition(&file, end_of_origin, SOURCE).unwrap();
        assert_eq!(target.offset(), offset_of("origin", 0));
    }

    #[test]
    fn test_no_target_for_unknown_or_out_of_range() {
        let provider = RustDefinitionProvider::new();
        let file = LocalVirtualFile::shared("/src/geometry.rs");

        assert!(provider.goto_definition(&file, offset_of("i32", 0), SOURCE).is_none());
        assert!(provider.goto_definition(&file, SOURCE.chars().count() + 5, SOURCE).is_none());
        assert!(provider.goto_definition(&file, offset_of("fn", 0), SOURCE).is_none());
        assert!(provider.goto_definition(&file, 0, "").is_none());
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let provider = RustDefinitionProvider::new();
        let file = LocalVirtualFile::shared("/src/unicode.rs");
        let source = "// héllo wörld\nconst LIMIT: u8 = 3;\nfn f() -> u8 { LIMIT }\n";

        let usage_byte = source.rfind("LIMIT").unwrap();
        let usage = source[..usage_byte].chars().count();
        let target = provider.goto_definition(&file, usage, source).unwrap();
        let def_byte = source.find("LIMIT").unwrap();
        assert_eq!(target.offset(), source[..def_byte].chars().count());
    }

    #[test]
    fn test_supports_only_rust_files() {
        let provider = RustDefinitionProvider::new();
        assert!(provider.supports(&LocalVirtualFile::new("/src/main.rs")));
        assert!(provider.supports(&LocalVirtualFile::new("/src/MAIN.RS")));
        assert!(!provider.supports(&LocalVirtualFile::new("/src/main.c")));
        assert!(!provider.supports(&LocalVirtualFile::new("/src/Makefile")));
    }
}
