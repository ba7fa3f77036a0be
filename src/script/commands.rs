use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{ScriptError, ScriptResult};
use crate::foundation::range::{AxisRange, RangeSpec};
use crate::script::factory::{ContextFactory, DiagnosticKind};

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z][A-Za-z0-9_]*)="(.+)"\s*$"#).expect("valid var pattern")
});

/// Handler applied to the argument text of one script command.
pub trait FactoryCommand: Sync {
    /// Interpret `args` and record the result on `factory`.
    fn init(&self, factory: &mut ContextFactory, args: &str) -> ScriptResult<()>;
}

/// Closed set of commands understood by [`ContextFactory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `var NAME="VALUE"`
    Var,
    /// `range AXIS START END STEP`
    Range,
    /// `img NAME PATH`
    Img,
    /// `miff PATH`
    Miff,
}

impl CommandKind {
    /// Every command, in documentation order.
    pub const ALL: [CommandKind; 4] = [Self::Var, Self::Range, Self::Img, Self::Miff];

    /// Resolve a command name as written in a script.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Script spelling of the command.
    pub fn name(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Range => "range",
            Self::Img => "img",
            Self::Miff => "miff",
        }
    }

    /// Handler registered for the command.
    pub fn handler(self) -> &'static dyn FactoryCommand {
        match self {
            Self::Var => &VarCommand,
            Self::Range => &RangeCommand,
            Self::Img => &ImgCommand,
            Self::Miff => &MiffCommand,
        }
    }
}

struct VarCommand;

impl FactoryCommand for VarCommand {
    fn init(&self, factory: &mut ContextFactory, args: &str) -> ScriptResult<()> {
        let Some(caps) = VAR_RE.captures(args) else {
            factory.note(DiagnosticKind::PatternMismatch {
                command: CommandKind::Var.name(),
                args: args.to_string(),
            });
            return Ok(());
        };
        factory.set_var(&caps[1], &caps[2]);
        Ok(())
    }
}

struct RangeCommand;

impl FactoryCommand for RangeCommand {
    fn init(&self, factory: &mut ContextFactory, args: &str) -> ScriptResult<()> {
        let fields: Vec<&str> = args.split_whitespace().collect();
        let [axis, start, end, step, ..] = fields.as_slice() else {
            return Err(ScriptError::InvalidArgumentCount {
                command: CommandKind::Range.name(),
                expected: 4,
                found: fields.len(),
            });
        };

        let start = parse_int(start)?;
        let end = parse_int(end)?;
        let step = parse_int(step)?;
        let spec = RangeSpec::new(start, end, step)
            .map_err(|_| ScriptError::ZeroStep((*axis).to_string()))?;
        factory.set_range(AxisRange::new(*axis, spec));
        Ok(())
    }
}

struct ImgCommand;

impl FactoryCommand for ImgCommand {
    fn init(&self, factory: &mut ContextFactory, args: &str) -> ScriptResult<()> {
        let mut fields = args.split_whitespace();
        let (Some(name), Some(first)) = (fields.next(), fields.next()) else {
            return Err(ScriptError::InvalidArgumentCount {
                command: CommandKind::Img.name(),
                expected: 2,
                found: args.split_whitespace().count(),
            });
        };
        let locator: String = std::iter::once(first).chain(fields).collect();
        factory.set_img(name, locator);
        Ok(())
    }
}

struct MiffCommand;

impl FactoryCommand for MiffCommand {
    fn init(&self, factory: &mut ContextFactory, args: &str) -> ScriptResult<()> {
        let locator: String = args.split_whitespace().collect();
        factory.set_initial(locator);
        Ok(())
    }
}

fn parse_int(token: &str) -> ScriptResult<i64> {
    token
        .parse::<i64>()
        .map_err(|_| ScriptError::NotAnInteger(token.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/script/commands.rs"]
mod tests;
