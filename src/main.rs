mod cli;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use flow::Flow;
use std::process::ExitCode;
use task_workflow::{init_logging, BackendFactory, TaskDefaults, TaskError, TaskRegistry, TaskRunner, TaskflowConfig};

/// Punto de entrada de `taskflow`.
///
/// Resuelve la configuración, registra las tareas incluidas, abre el
/// backend y conduce la tarea del verbo pedido. Imprime el contenido de la
/// referencia titular (o el resumen JSON con `--json`).
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            let code = e.downcast_ref::<TaskError>().map(TaskError::exit_code).unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.resolve_config()?;
    init_logging(config.log_format, cli.verbose);
    dispatch(&cli, &config).await
}

async fn dispatch(cli: &Cli, config: &TaskflowConfig) -> anyhow::Result<ExitCode> {
    let registry = TaskRegistry::with_builtins(&TaskDefaults::from_config(config))?;
    let Some(verb) = cli.verb.as_deref() else {
        print_usage(&registry);
        return Ok(ExitCode::from(2));
    };
    let Some(handler) = registry.get(verb) else {
        eprintln!("verbo desconocido: '{}'", verb);
        print_usage(&registry);
        return Ok(ExitCode::from(2));
    };

    // Argumentos inválidos no deben dejar una raíz vacía en disco.
    if let Err(e) = handler.validate(&cli.args) {
        eprintln!("uso: taskflow {}", handler.usage());
        return Err(e.into());
    }

    let backend = BackendFactory::open(config).await.context("no se pudo abrir el backend")?;
    let mut runner = TaskRunner::new(backend.flow.as_ref());
    let report = match runner.run(handler.as_ref(), &cli.args).await {
        Ok(report) => report,
        Err(e) => {
            if let Some(root) = &backend.root {
                log::info!("referencias parciales en {}", root.display());
            }
            return Err(e.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report.summary())?);
    } else {
        let content = backend.flow.get(&report.headline).await.unwrap_or_default();
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn print_usage(registry: &TaskRegistry) {
    eprintln!("tareas disponibles:");
    for line in registry.usage_lines() {
        eprintln!("  taskflow {}", line);
    }
}
