use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_PROGRAM: &str = "fastboot";

/// A single invocation of the flashing tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FastbootCommand {
    /// `flash <target> <image>`, target already slot-qualified
    Flash { target: String, image: PathBuf },
    /// `erase <partition>`
    Erase { partition: String },
    /// `-w`, wipe user data
    Wipe,
}

impl FastbootCommand {
    /// Arguments passed to the tool. The image path is handed over as-is,
    /// it need not be valid UTF-8.
    pub fn args(&self) -> Vec<OsString> {
        match self {
            FastbootCommand::Flash { target, image } => vec![
                OsString::from("flash"),
                OsString::from(target),
                image.as_os_str().to_os_string(),
            ],
            FastbootCommand::Erase { partition } => {
                vec![OsString::from("erase"), OsString::from(partition)]
            }
            FastbootCommand::Wipe => vec![OsString::from("-w")],
        }
    }

    /// Command line as shown to the operator, image path in double quotes.
    pub fn render(&self, program: &str) -> String {
        match self {
            FastbootCommand::Flash { target, image } => {
                format!("{} flash {} \"{}\"", program, target, image.display())
            }
            FastbootCommand::Erase { partition } => format!("{} erase {}", program, partition),
            FastbootCommand::Wipe => format!("{} -w", program),
        }
    }
}

impl fmt::Display for FastbootCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PROGRAM))
    }
}
