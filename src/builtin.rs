//! Built-in signature, language-marker, and extension tables.
//!
//! Registration order is part of the contract: it breaks specificity ties
//! (e.g. Mach-O universal binaries and Java class files share the
//! `CA FE BA BE` magic, and the earlier Mach-O entry wins). New entries
//! belong at the end of their section unless they must shadow an existing
//! one.

use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::db::{LanguageMarker, Signature, SignatureDatabase};

/// Extension-to-label table for the filesystem tier. Compared
/// case-insensitively against the file name; the longest matching suffix
/// wins, so `.tar.gz` shadows `.gz`.
pub const EXTENSION_LABELS: &[(&str, &str)] = &[
    // Programming languages
    (".py", "Python source"),
    (".js", "JavaScript source"),
    (".ts", "TypeScript source"),
    (".java", "Java source"),
    (".c", "C source"),
    (".h", "C source"),
    (".cpp", "C++ source"),
    (".cxx", "C++ source"),
    (".cc", "C++ source"),
    (".hpp", "C++ source"),
    (".rs", "Rust source"),
    (".go", "Go source"),
    (".php", "PHP source"),
    (".rb", "Ruby source"),
    (".pl", "Perl source"),
    (".sh", "Shell script"),
    (".bash", "Shell script"),
    (".zsh", "Shell script"),
    (".fish", "Shell script"),
    (".ps1", "PowerShell script"),
    (".bat", "Batch file"),
    (".cmd", "Batch file"),
    // Web and data formats
    (".html", "HTML document"),
    (".htm", "HTML document"),
    (".css", "CSS stylesheet"),
    (".xml", "XML document"),
    (".json", "JSON data"),
    (".yaml", "YAML data"),
    (".yml", "YAML data"),
    (".toml", "TOML data"),
    (".csv", "CSV data"),
    (".tsv", "TSV data"),
    // Documents
    (".pdf", "PDF document"),
    (".doc", "Microsoft Word document"),
    (".docx", "Microsoft Word document"),
    (".xls", "Microsoft Excel spreadsheet"),
    (".xlsx", "Microsoft Excel spreadsheet"),
    (".ppt", "Microsoft PowerPoint presentation"),
    (".pptx", "Microsoft PowerPoint presentation"),
    (".txt", "Text file"),
    (".md", "Markdown document"),
    (".markdown", "Markdown document"),
    // Images
    (".jpg", "JPEG image"),
    (".jpeg", "JPEG image"),
    (".png", "PNG image"),
    (".gif", "GIF image"),
    (".svg", "SVG image"),
    (".tif", "TIFF image"),
    (".tiff", "TIFF image"),
    (".bmp", "BMP image"),
    (".webp", "WebP image"),
    (".ico", "ICO image"),
    // Audio and video
    (".mp3", "MP3 audio"),
    (".mp4", "MP4 video"),
    (".avi", "AVI video"),
    (".wav", "WAV audio"),
    (".flac", "FLAC audio"),
    (".ogg", "Ogg container"),
    // Archives; multi-part suffixes shadow their tails
    (".zip", "ZIP archive"),
    (".tar", "TAR archive"),
    (".gz", "GZIP archive"),
    (".tar.gz", "compressed TAR archive"),
    (".tgz", "compressed TAR archive"),
    (".tar.bz2", "compressed TAR archive"),
    (".tar.xz", "compressed TAR archive"),
    (".bz2", "BZIP2 archive"),
    (".xz", "XZ archive"),
    (".zst", "Zstandard compressed data"),
    (".rar", "RAR archive"),
    (".7z", "7-Zip archive"),
    // Misc
    (".sqlite", "SQLite database"),
    (".log", "Log file"),
    (".ini", "Configuration file"),
    (".cfg", "Configuration file"),
    (".conf", "Configuration file"),
];

// RIFF container: four literal bytes, four wildcarded length bytes, then the
// form tag.
fn riff(form: &[u8; 4], label: &str) -> Signature {
    let mut pattern: Vec<Option<u8>> = b"RIFF".iter().copied().map(Some).collect();
    pattern.extend([None; 4]);
    pattern.extend(form.iter().copied().map(Some));
    Signature::with_wildcards(0, pattern, label)
}

/// Built-in binary signatures, in registration order.
pub fn signatures() -> Vec<Signature> {
    vec![
        // Executables and bytecode
        Signature::exact(0, &[0x7F, b'E', b'L', b'F'], "ELF executable"),
        Signature::exact(0, b"MZ", "PE executable"),
        Signature::exact(0, &[0xFE, 0xED, 0xFA, 0xCE], "Mach-O executable"),
        Signature::exact(0, &[0xFE, 0xED, 0xFA, 0xCF], "Mach-O executable"),
        Signature::exact(0, &[0xCA, 0xFE, 0xBA, 0xBE], "Mach-O universal binary"),
        Signature::exact(0, &[0xCA, 0xFE, 0xBA, 0xBE], "Java class file"),
        Signature::exact(0, &[0x00, b'a', b's', b'm'], "WebAssembly binary"),
        Signature::exact(0, &[0xA7, 0x0D, 0x0D, 0x0A], "Python bytecode"),
        Signature::exact(0, &[0xCB, 0x0D, 0x0D, 0x0A], "Python bytecode"),
        Signature::exact(0, &[0xF3, 0x0D, 0x0D, 0x0A], "Python bytecode"),
        // Documents
        Signature::exact(0, b"%PDF", "PDF document"),
        Signature::exact(0, b"%!PS", "PostScript document"),
        Signature::exact(0, b"<?xml", "XML document"),
        // Images
        Signature::exact(0, &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A], "PNG image"),
        Signature::exact(0, &[0xFF, 0xD8, 0xFF], "JPEG image"),
        Signature::exact(0, b"GIF87a", "GIF image"),
        Signature::exact(0, b"GIF89a", "GIF image"),
        Signature::exact(0, &[b'I', b'I', 0x2A, 0x00], "TIFF image"),
        Signature::exact(0, &[b'M', b'M', 0x00, 0x2A], "TIFF image"),
        Signature::exact(0, b"BM", "BMP image"),
        riff(b"WEBP", "WebP image"),
        // Audio and video
        riff(b"WAVE", "WAV audio"),
        riff(b"AVI ", "AVI video"),
        Signature::exact(0, b"ID3", "MP3 audio"),
        Signature::exact(0, b"OggS", "Ogg container"),
        Signature::exact(0, b"fLaC", "FLAC audio"),
        Signature::exact(4, b"ftyp", "MP4 video"),
        // Archives and compression
        Signature::exact(0, b"PK\x03\x04", "ZIP archive"),
        Signature::exact(0, b"PK\x05\x06", "ZIP archive"),
        Signature::exact(0, &[0x1F, 0x8B], "GZIP archive"),
        Signature::exact(0, b"BZh", "BZIP2 archive"),
        Signature::exact(0, &[0xFD, b'7', b'z', b'X', b'Z', 0x00], "XZ archive"),
        Signature::exact(0, &[b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C], "7-Zip archive"),
        Signature::exact(0, &[0x28, 0xB5, 0x2F, 0xFD], "Zstandard compressed data"),
        Signature::exact(0, &[b'R', b'a', b'r', b'!', 0x1A, 0x07, 0x00], "RAR archive"),
        Signature::exact(0, &[b'R', b'a', b'r', b'!', 0x1A, 0x07, 0x01, 0x00], "RAR archive"),
        // POSIX tar stores its magic past the 257-byte header name field.
        Signature::exact(257, b"ustar", "TAR archive"),
        // Databases
        Signature::exact(0, b"SQLite format 3\x00", "SQLite database"),
    ]
}

/// Built-in language markers, in registration order.
///
/// Content patterns are conjunctive: every pattern of a marker must occur
/// for the marker to match. Single keywords are not distinctive enough on
/// their own.
pub fn markers() -> Vec<LanguageMarker> {
    vec![
        LanguageMarker::new("Python source", Some("python"), &["import ", "def "]),
        LanguageMarker::new("JavaScript source", Some("node"), &["function ", "const "]),
        LanguageMarker::new("Ruby source", Some("ruby"), &["require ", "end"]),
        LanguageMarker::new("Perl source", Some("perl"), &["use strict", "my $"]),
        LanguageMarker::new("PHP source", Some("php"), &["<?php"]),
        LanguageMarker::for_interpreter("Shell script", "bash"),
        LanguageMarker::for_interpreter("Shell script", "zsh"),
        LanguageMarker::for_interpreter("Shell script", "fish"),
        LanguageMarker::for_interpreter("Shell script", "dash"),
        LanguageMarker::for_interpreter("Shell script", "ksh"),
        LanguageMarker::for_interpreter("Shell script", "sh"),
        LanguageMarker::for_interpreter("AWK script", "awk"),
        LanguageMarker::for_content("C source", &["#include", "int main"]),
        LanguageMarker::for_content("C++ source", &["#include", "int main", "std::"]),
        LanguageMarker::for_content("Java source", &["public class ", "import java"]),
        LanguageMarker::for_content("Rust source", &["fn ", "let "]),
        LanguageMarker::for_content("HTML document", &["<html", "<head"]),
    ]
}

static BUILTIN: Lazy<Arc<SignatureDatabase>> = Lazy::new(|| {
    Arc::new(
        SignatureDatabase::new(signatures(), markers())
            .expect("built-in signature database is valid"),
    )
});

/// The shared built-in database instance.
pub fn default_database() -> Arc<SignatureDatabase> {
    Arc::clone(&BUILTIN)
}
