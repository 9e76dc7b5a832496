use std::fmt;

/// Call-site identity: `(filePath, lineNumber, functionName, sectionName?)`.
/// Two sections at the same file/line/function but different
/// `section_name` are distinct identities. `function_name` is captured as
/// `module_path!()` at the macro expansion site — Rust has no builtin
/// "current function" token, and `module_path!()` is the same
/// compile-time-constant mechanism `tracing::span!` uses for its own
/// `Metadata`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileLocation {
    pub file_path: &'static str,
    pub line_number: u32,
    pub function_name: &'static str,
    pub section_name: Option<String>,
}

impl ProfileLocation {
    pub fn new(
        file_path: &'static str,
        line_number: u32,
        function_name: &'static str,
        section_name: Option<&str>,
    ) -> Self {
        Self {
            file_path,
            line_number,
            function_name,
            section_name: section_name.map(str::to_owned),
        }
    }

    /// `filePath|lineNumber|functionName[|sectionName]`
    pub fn id(&self) -> String {
        match &self.section_name {
            Some(name) => format!(
                "{}|{}|{}|{name}",
                self.file_path, self.line_number, self.function_name
            ),
            None => format!("{}|{}|{}", self.file_path, self.line_number, self.function_name),
        }
    }

    /// Strips `prefix` from the front of `file_path` for display purposes
    /// (used by tree reconstruction's `pathTrim`). Returns a fresh owned
    /// location rather than mutating in place, since `file_path` is a
    /// `'static str`.
    pub fn with_trimmed_path(&self, prefix: &str) -> OwnedProfileLocation {
        let trimmed = self.file_path.strip_prefix(prefix).unwrap_or(self.file_path);
        OwnedProfileLocation {
            file_path: trimmed.to_string(),
            line_number: self.line_number,
            function_name: self.function_name.to_string(),
            section_name: self.section_name.clone(),
        }
    }
}

/// Like [`ProfileLocation`] but with an owned, possibly-trimmed `file_path`
/// — used once records have been reconstructed into a report tree, after
/// which the `'static` source strings no longer need to be threaded
/// around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedProfileLocation {
    pub file_path: String,
    pub line_number: u32,
    pub function_name: String,
    pub section_name: Option<String>,
}

impl OwnedProfileLocation {
    pub fn id(&self) -> String {
        match &self.section_name {
            Some(name) => format!(
                "{}|{}|{}|{name}",
                self.file_path, self.line_number, self.function_name
            ),
            None => format!("{}|{}|{}", self.file_path, self.line_number, self.function_name),
        }
    }

    pub fn display_name(&self) -> &str {
        self.section_name.as_deref().unwrap_or(&self.function_name)
    }
}

impl fmt::Display for OwnedProfileLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_call_site_different_section_names_are_distinct() {
        let a = ProfileLocation::new("f.rs", 10, "mod::f", Some("A"));
        let b = ProfileLocation::new("f.rs", 10, "mod::f", Some("B"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn id_omits_trailing_pipe_when_section_name_absent() {
        let a = ProfileLocation::new("f.rs", 10, "mod::f", None);
        assert_eq!(a.id(), "f.rs|10|mod::f");
    }

    #[test]
    fn with_trimmed_path_strips_configured_prefix() {
        let loc = ProfileLocation::new("/home/me/proj/src/main.rs", 1, "main", None);
        let trimmed = loc.with_trimmed_path("/home/me/proj/");
        assert_eq!(trimmed.file_path, "src/main.rs");
    }
}
