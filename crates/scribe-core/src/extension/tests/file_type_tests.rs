use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

use crate::extension::error::ExtensionError;
use crate::extension::file_type::FileType;
use crate::extension::language::Language;
use crate::extension::set::RegistrySet;
use crate::vfs::LocalVirtualFile;

#[test]
fn test_associated_file_type_for_language() {
    let registries = RegistrySet::new();
    let xml = registries.languages.register_language(Language::new("xml"), "host").unwrap();
    let xml_type = Arc::new(FileType::for_language(xml, ["xml"]));
    registries.file_types.register(xml_type.clone(), "host").unwrap();

    let associated = registries
        .file_types
        .associated_file_type("xml")
        .expect("xml should have an associated file type");
    assert!(Arc::ptr_eq(&associated, &xml_type));
    assert!(associated.is_language_file_type());

    assert!(registries.file_types.file_type_for_extension("xml").is_some());
    assert!(registries.file_types.file_type_for_extension("json").is_none());
    assert!(registries.file_types.associated_file_type("json").is_none());
}

#[test]
fn test_first_registered_file_type_wins() {
    let registries = RegistrySet::new();
    let xml = registries.languages.register_language(Language::new("xml"), "host").unwrap();

    registries
        .file_types
        .register(Arc::new(FileType::for_language(xml.clone(), ["xml"]).with_name("XML")), "host")
        .unwrap();
    registries
        .file_types
        .register(Arc::new(FileType::for_language(xml, ["xsd", "xml"]).with_name("XML Schema")), "plugin")
        .unwrap();

    assert_eq!(registries.file_types.associated_file_type("xml").unwrap().name(), "XML");
    assert_eq!(registries.file_types.file_type_for_extension("xml").unwrap().name(), "XML");
    assert_eq!(registries.file_types.file_type_for_extension("xsd").unwrap().name(), "XML Schema");
}

#[test]
fn test_duplicate_file_type_name_rejected() {
    let registries = RegistrySet::new();
    registries.file_types.register(Arc::new(FileType::new("Text", ["txt"])), "host").unwrap();

    let err = registries
        .file_types
        .register(Arc::new(FileType::new("Text", ["text"])), "plugin")
        .unwrap_err();
    assert!(matches!(err, ExtensionError::DuplicateRegistration { kind: "file type", .. }));
}

#[test]
fn test_extension_matching_is_case_insensitive() {
    let file_type = FileType::new("Markdown", [".MD", "markdown"]);
    assert_eq!(file_type.extensions(), &["md".to_string(), "markdown".to_string()]);
    assert!(file_type.matches_extension("md"));
    assert!(file_type.matches_extension(".Md"));
    assert!(file_type.matches_extension("MARKDOWN"));
    assert!(!file_type.matches_extension("mdx"));
}

#[test]
fn test_empty_extension_never_matches() {
    let registries = RegistrySet::new();
    registries.file_types.register(Arc::new(FileType::new("Odd", [""])), "host").unwrap();
    assert!(registries.file_types.file_type_for_extension("").is_none());
    assert!(registries.file_types.file_type_for_extension(".").is_none());
}

#[test]
fn test_file_type_attributes() {
    let png = FileType::new("PNG", ["png"])
        .binary()
        .with_description("Portable Network Graphics")
        .with_icon("icons/image.svg");
    assert!(png.is_binary());
    assert_eq!(png.description(), "Portable Network Graphics");
    assert_eq!(png.icon(), Some("icons/image.svg"));
    assert!(png.language().is_none());

    let rust = Arc::new(Language::new("rust").with_display_name("Rust"));
    let rs = FileType::for_language(rust, ["rs"]);
    assert_eq!(rs.name(), "Rust");
    assert!(!rs.is_binary());
}

#[test]
fn test_file_type_for_virtual_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let registries = RegistrySet::new();
    let xml = registries.languages.register_language(Language::new("xml"), "host").unwrap();
    registries.file_types.register(Arc::new(FileType::for_language(xml, ["xml"])), "host").unwrap();

    let file_path = temp_dir.path().join("pom.XML");
    fs::write(&file_path, "<project/>").unwrap();
    let found = registries.file_types.file_type_for(&LocalVirtualFile::new(&file_path));
    assert_eq!(found.unwrap().language().unwrap().id(), "xml");

    // A directory named like a file type is not that file type
    let dir_path = temp_dir.path().join("looks.xml");
    fs::create_dir(&dir_path).unwrap();
    assert!(registries.file_types.file_type_for(&LocalVirtualFile::new(&dir_path)).is_none());

    let no_ext = temp_dir.path().join("Makefile");
    fs::write(&no_ext, "").unwrap();
    assert!(registries.file_types.file_type_for(&LocalVirtualFile::new(&no_ext)).is_none());
}
