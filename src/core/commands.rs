use crate::core::{confirm, manifest, render, request};
use crate::domain::ports::{ApiRequest, Transport};
use crate::utils::error::{CraneError, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything a command may touch besides the API: its positional
/// arguments and the three standard streams.
pub struct Context<'a> {
    pub args: Vec<String>,
    pub stdin: &'a mut dyn BufRead,
    pub stdout: &'a mut dyn Write,
    pub stderr: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(
        args: Vec<String>,
        stdin: &'a mut dyn BufRead,
        stdout: &'a mut dyn Write,
        stderr: &'a mut dyn Write,
    ) -> Self {
        Self {
            args,
            stdin,
            stdout,
            stderr,
        }
    }

    fn arg(&self, index: usize) -> Result<String> {
        self.args
            .get(index)
            .cloned()
            .ok_or_else(|| CraneError::UsageError {
                message: "wrong number of arguments".to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub name: &'static str,
    pub usage: &'static str,
    pub desc: &'static str,
    pub min_args: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceCommand {
    Create,
    Remove,
    List,
    Update,
    DocGet,
    DocAdd,
    Template,
}

impl ServiceCommand {
    pub const ALL: [ServiceCommand; 7] = [
        ServiceCommand::Create,
        ServiceCommand::Remove,
        ServiceCommand::List,
        ServiceCommand::Update,
        ServiceCommand::DocGet,
        ServiceCommand::DocAdd,
        ServiceCommand::Template,
    ];

    pub fn info(&self) -> Info {
        match self {
            ServiceCommand::Create => Info {
                name: "create",
                usage: "create path/to/manifest [- for stdin]",
                desc: "Creates a service based on a passed manifest. The manifest format should be a yaml and follow the standard described in the documentation (should link to it here).",
                min_args: 1,
            },
            ServiceCommand::Remove => Info {
                name: "remove",
                usage: "remove <servicename>",
                desc: "removes a service from catalog",
                min_args: 1,
            },
            ServiceCommand::List => Info {
                name: "list",
                usage: "list",
                desc: "list services that belongs to user's team and it's service instances.",
                min_args: 0,
            },
            ServiceCommand::Update => Info {
                name: "update",
                usage: "update <path/to/manifest>",
                desc: "Update service data, extracting it from the given manifest file.",
                min_args: 1,
            },
            ServiceCommand::DocGet => Info {
                name: "doc-get",
                usage: "service doc-get <service>",
                desc: "Shows service documentation.",
                min_args: 1,
            },
            ServiceCommand::DocAdd => Info {
                name: "doc-add",
                usage: "service doc-add <service> <path/to/docfile>",
                desc: "Update service documentation, extracting it from the given file.",
                min_args: 2,
            },
            ServiceCommand::Template => Info {
                name: "template",
                usage: "template\ne.g.: $ crane template",
                desc: "Generates a manifest template file and places it in current directory",
                min_args: 0,
            },
        }
    }

    pub async fn run(&self, ctx: &mut Context<'_>, transport: &dyn Transport) -> Result<()> {
        tracing::debug!("Running {} with {} argument(s)", self.info().name, ctx.args.len());
        match self {
            ServiceCommand::Create => create(ctx, transport).await,
            ServiceCommand::Remove => remove(ctx, transport).await,
            ServiceCommand::List => list(ctx, transport).await,
            ServiceCommand::Update => update(ctx, transport).await,
            ServiceCommand::DocGet => doc_get(ctx, transport).await,
            ServiceCommand::DocAdd => doc_add(ctx, transport).await,
            ServiceCommand::Template => template_in(ctx, Path::new(".")),
        }
    }
}

/// 送出請求、檢查版本標頭並套用狀態碼規則
async fn exchange(
    ctx: &mut Context<'_>,
    transport: &dyn Transport,
    request: ApiRequest,
) -> Result<Vec<u8>> {
    let response = transport.send(request).await?;
    render::warn_if_unsupported(&response, VERSION, &mut *ctx.stderr)?;
    render::expect_success(response)
}

async fn create(ctx: &mut Context<'_>, transport: &dyn Transport) -> Result<()> {
    let source = ctx.arg(0)?;
    let manifest = manifest::load(&source, &mut *ctx.stdin)?;
    exchange(ctx, transport, request::create_service(&manifest)).await?;
    writeln!(ctx.stdout, "Service successfully created")?;
    Ok(())
}

async fn remove(ctx: &mut Context<'_>, transport: &dyn Transport) -> Result<()> {
    let name = ctx.arg(0)?;
    let question = format!("Are you sure you want to remove the service \"{}\"?", name);
    if !confirm::confirm(&question, &mut *ctx.stdin, &mut *ctx.stdout)? {
        tracing::debug!("Removal of {} not confirmed", name);
        return Ok(());
    }

    exchange(ctx, transport, request::remove_service(&name)).await?;
    writeln!(ctx.stdout, "Service successfully removed.")?;
    Ok(())
}

async fn list(ctx: &mut Context<'_>, transport: &dyn Transport) -> Result<()> {
    let body = exchange(ctx, transport, request::list_services()).await?;
    let entries = render::decode_service_list(&body)?;
    ctx.stdout
        .write_all(render::service_table(&entries).as_bytes())?;
    Ok(())
}

async fn update(ctx: &mut Context<'_>, transport: &dyn Transport) -> Result<()> {
    let source = ctx.arg(0)?;
    let manifest = manifest::load(&source, &mut *ctx.stdin)?;
    exchange(ctx, transport, request::update_service(&manifest)).await?;
    writeln!(ctx.stdout, "Service successfully updated.")?;
    Ok(())
}

async fn doc_get(ctx: &mut Context<'_>, transport: &dyn Transport) -> Result<()> {
    let name = ctx.arg(0)?;
    let body = exchange(ctx, transport, request::get_doc(&name)).await?;
    ctx.stdout.write_all(&body)?;
    Ok(())
}

async fn doc_add(ctx: &mut Context<'_>, transport: &dyn Transport) -> Result<()> {
    let name = ctx.arg(0)?;
    let path = PathBuf::from(ctx.arg(1)?);
    let doc = std::fs::read(&path).map_err(|source| CraneError::ReadError {
        path: path.clone(),
        source,
    })?;

    exchange(ctx, transport, request::add_doc(&name, doc)).await?;
    writeln!(
        ctx.stdout,
        "Documentation for '{}' successfully updated.",
        name
    )?;
    Ok(())
}

/// Writes `manifest.yaml` into `dir`; the binary always passes the
/// current directory.
pub fn template_in(ctx: &mut Context<'_>, dir: &Path) -> Result<()> {
    manifest::write_template(&dir.join(manifest::TEMPLATE_FILE))?;
    writeln!(
        ctx.stdout,
        "Generated file \"{}\" in current directory",
        manifest::TEMPLATE_FILE
    )?;
    Ok(())
}
