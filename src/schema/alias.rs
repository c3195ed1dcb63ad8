// Thu Oct 15 2026 - Alex

use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoder selected for a primitive parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeafKind {
    UnsignedInt,
    AsciiString,
    WideString,
}

impl LeafKind {
    pub fn name(&self) -> &'static str {
        match self {
            LeafKind::UnsignedInt => "uint",
            LeafKind::AsciiString => "ascii",
            LeafKind::WideString => "wide",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, LeafKind::AsciiString | LeafKind::WideString)
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ASCII_ALIASES: &[&str] = &[
    "ascii", "char*", "const char*", "LPSTR", "LPCSTR", "PSTR", "PCSTR", "PCHAR", "PSZ", "LPSTR_32", "LPSTR_64",
    "LPCSTR_32", "LPCSTR_64",
];

const WIDE_ALIASES: &[&str] = &[
    "wide", "wchar_t*", "const wchar_t*", "LPWSTR", "LPCWSTR", "PWSTR", "PCWSTR", "PWCHAR", "LPWSTR_32", "LPWSTR_64",
    "LPCWSTR_32", "LPCWSTR_64", "UNICODE_WSTR", "UNICODE_WSTR_32", "UNICODE_WSTR_64",
];

const UNSIGNED_ALIASES: &[&str] = &[
    "uint", "bool", "BOOL", "BOOLEAN", "char", "unsigned char", "UCHAR", "BYTE", "short", "unsigned short", "USHORT",
    "WORD", "WCHAR", "int", "unsigned int", "UINT", "INT", "long", "unsigned long", "LONG", "ULONG", "DWORD",
    "__int32", "unsigned __int32", "__int64", "unsigned __int64", "long long", "unsigned long long", "LONGLONG",
    "ULONGLONG", "LONG64", "ULONG64", "DWORD64", "QWORD", "__ptr32", "__ptr64", "void*", "PVOID", "LPVOID",
    "LPCVOID", "HANDLE", "PHANDLE", "HMODULE", "HKEY", "SIZE_T", "PSIZE_T", "ULONG_PTR", "DWORD_PTR", "UINT_PTR",
    "LONG_PTR", "INT_PTR", "ACCESS_MASK", "NTSTATUS", "PULONG", "PLARGE_INTEGER", "LARGE_INTEGER",
];

static ALIASES: Lazy<AHashMap<&'static str, LeafKind>> = Lazy::new(|| {
    let mut table = AHashMap::new();
    for alias in ASCII_ALIASES {
        table.insert(*alias, LeafKind::AsciiString);
    }
    for alias in WIDE_ALIASES {
        table.insert(*alias, LeafKind::WideString);
    }
    for alias in UNSIGNED_ALIASES {
        table.insert(*alias, LeafKind::UnsignedInt);
    }
    table
});

/// Case-sensitive lookup of a declared type name.
pub fn lookup_alias(alias: &str) -> Option<LeafKind> {
    ALIASES.get(alias.trim()).copied()
}

pub fn alias_count() -> usize {
    ALIASES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_aliases() {
        assert_eq!(lookup_alias("LPSTR_64"), Some(LeafKind::AsciiString));
        assert_eq!(lookup_alias("UNICODE_WSTR_64"), Some(LeafKind::WideString));
        assert_eq!(lookup_alias("unsigned __int64"), Some(LeafKind::UnsignedInt));
        assert_eq!(lookup_alias("__ptr64"), Some(LeafKind::UnsignedInt));
        assert_eq!(lookup_alias(" int "), Some(LeafKind::UnsignedInt));
    }

    #[test]
    fn test_unknown_alias() {
        assert_eq!(lookup_alias("FLOAT"), None);
        assert_eq!(lookup_alias("lpstr"), None);
    }

    #[test]
    fn test_aliases_map_to_one_kind() {
        let total = ASCII_ALIASES.len() + WIDE_ALIASES.len() + UNSIGNED_ALIASES.len();
        assert_eq!(alias_count(), total);
    }
}
