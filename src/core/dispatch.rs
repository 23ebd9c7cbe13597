use crate::core::commands::{Context, ServiceCommand};
use crate::domain::ports::Transport;
use crate::utils::error::{CraneError, Result};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    Run(ServiceCommand),
    /// Always fails with the stored message and touches nothing else.
    Reject { message: String },
}

#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: BTreeMap<&'static str, Handler>,
}

impl CommandTable {
    pub fn standard() -> Self {
        let entries = ServiceCommand::ALL
            .iter()
            .map(|command| (command.info().name, Handler::Run(*command)))
            .collect();
        Self { entries }
    }

    /// Same names as [`CommandTable::standard`], each redirecting the user
    /// to `<replacement> service-<name>`.
    pub fn deprecated(replacement: &str) -> Self {
        let entries = ServiceCommand::ALL
            .iter()
            .map(|command| {
                let name = command.info().name;
                let message = format!(
                    "This command was moved to \"{} service-{}\". Please use it instead.",
                    replacement, name
                );
                (name, Handler::Reject { message })
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Handler> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Resolves `name` to a runnable command. Unknown names, rejected
    /// names and too few arguments fail here, before any config or I/O.
    pub fn lookup(&self, program: &str, name: &str, arg_count: usize) -> Result<ServiceCommand> {
        match self.get(name) {
            None => Err(CraneError::UsageError {
                message: format!(
                    "{}: \"{}\" is not a {} command. See \"{} help\".",
                    program, name, program, program
                ),
            }),
            Some(Handler::Reject { message }) => Err(CraneError::DeprecatedError {
                message: message.clone(),
            }),
            Some(Handler::Run(command)) => {
                let info = command.info();
                if arg_count < info.min_args {
                    return Err(CraneError::UsageError {
                        message: format!(
                            "wrong number of arguments.\n\nUsage: {} {}",
                            program, info.usage
                        ),
                    });
                }
                Ok(*command)
            }
        }
    }

    /// 依名稱查找並執行命令；參數數量不足時在任何 I/O 之前失敗
    pub async fn dispatch(
        &self,
        program: &str,
        name: &str,
        ctx: &mut Context<'_>,
        transport: &dyn Transport,
    ) -> Result<()> {
        let command = self.lookup(program, name, ctx.args.len())?;
        command.run(ctx, transport).await
    }

    pub fn usage(&self, program: &str) -> String {
        let mut out = format!(
            "{} version {}.\n\nUsage: {} command [args]\n\nAvailable commands:\n",
            program,
            crate::core::commands::VERSION,
            program
        );
        let width = self.names().map(str::len).max().unwrap_or(0);
        for (name, handler) in &self.entries {
            let desc = match handler {
                Handler::Run(command) => command.info().desc.to_string(),
                Handler::Reject { message } => message.clone(),
            };
            out.push_str(&format!("  {:<width$}  {}\n", name, desc, width = width));
        }
        out.push_str(&format!(
            "\nUse {} help <commandname> to get more information about a command.\n",
            program
        ));
        out
    }

    pub fn help(&self, program: &str, name: &str) -> Result<String> {
        match self.get(name) {
            Some(Handler::Run(command)) => {
                let info = command.info();
                let mut out = format!("Usage: {} {}\n\n{}\n", program, info.usage, info.desc);
                if info.min_args > 0 {
                    out.push_str(&format!("\nMinimum # of arguments: {}\n", info.min_args));
                }
                Ok(out)
            }
            Some(Handler::Reject { message }) => Err(CraneError::DeprecatedError {
                message: message.clone(),
            }),
            None => Err(CraneError::UsageError {
                message: format!("{}: \"{}\" is not a {} command.", program, name, program),
            }),
        }
    }
}

/// File name component of argv[0].
pub fn program_name(arg0: &str) -> String {
    Path::new(arg0)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("crane")
        .to_string()
}
