//! Command kinds and their fixed instruction phrases.

use std::fmt;

/// The user-selected operation driving which instruction phrase is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Suggest,
    Explain,
    Fix,
    Review,
    GenerateDocs,
    GenerateTests,
}

impl CommandKind {
    /// Every command kind, in surface order.
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Suggest,
        CommandKind::Explain,
        CommandKind::Fix,
        CommandKind::Review,
        CommandKind::GenerateDocs,
        CommandKind::GenerateTests,
    ];

    /// Stable command-surface name, as registered by the shell.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Suggest => "suggestCode",
            CommandKind::Explain => "explainCode",
            CommandKind::Fix => "fixCode",
            CommandKind::Review => "reviewCode",
            CommandKind::GenerateDocs => "generateDocs",
            CommandKind::GenerateTests => "generateTests",
        }
    }

    /// The instruction phrase placed ahead of the code in the prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            CommandKind::Suggest => "Suggest code to continue or improve the following:",
            CommandKind::Explain => "Explain this code:",
            CommandKind::Fix => "Fix this code:",
            CommandKind::Review => "Review this code and point out any problems:",
            CommandKind::GenerateDocs => "Write documentation comments for this code:",
            CommandKind::GenerateTests => "Write unit tests for this code:",
        }
    }

    /// Look a kind up by its command-surface name.
    pub fn from_name(name: &str) -> Option<CommandKind> {
        CommandKind::ALL.iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_roundtrip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CommandKind::from_name("formatCode"), None);
    }

    #[test]
    fn test_instructions_distinct() {
        for a in CommandKind::ALL {
            for b in CommandKind::ALL {
                if a != b {
                    assert_ne!(a.instruction(), b.instruction());
                }
            }
        }
    }

    #[test]
    fn test_fix_instruction_verbatim() {
        assert_eq!(CommandKind::Fix.instruction(), "Fix this code:");
    }
}
