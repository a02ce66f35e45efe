//! hookspec demo. Declares a greeting hook, registers implementations and
//! dispatches to them.
//!
//! Configuration comes from `config/default.toml`, the `config/{env}.toml`
//! overlay (env taken from `HOOKSPEC_ENV`) and `HOOKSPEC_*` variables.

use serde_json::Value;
use tracing_subscriber::{EnvFilter, fmt};

use hookspec::prelude::*;
use hookspec_core::config::HookspecConfig;

fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(&config) {
        tracing::error!("Demo error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> HookspecResult<HookspecConfig> {
    let env = std::env::var("HOOKSPEC_ENV").unwrap_or_else(|_| "development".to_string());
    HookspecConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &HookspecConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Build the demo namespace: two greeting hooks, a farewell hook and a plain
/// helper that discovery must skip.
fn build_namespace() -> HookspecResult<Namespace<Value>> {
    let greetings = HookSpec::parse("greetings", "greet, name")?
        .with_description("Called in scripts that want to print greetings.");
    let farewell = HookSpec::parse("farewell", "name")?;

    let greet = make_decorator(greetings, "title")?;
    let bye = make_decorator(farewell, ())?;

    let mut module = Namespace::new("demo");
    module.insert_hook(
        "formal",
        greet.with_inputs(["Formal"])?.decorate(
            "formal",
            "greet, name",
            |args: &Kwargs| {
                Value::from(format!(
                    "{}, dear {}.",
                    args.get_str("greet").unwrap_or_default(),
                    args.get_str("name").unwrap_or_default()
                ))
            },
        )?,
    )?;
    module.insert_hook(
        "casual",
        greet
            .with_inputs(["Casual"])?
            .decorate("casual", "name", |args: &Kwargs| {
                Value::from(format!("hey {}", args.get_str("name").unwrap_or_default()))
            })?,
    )?;
    module.insert_hook(
        "goodbye",
        bye.decorate("goodbye", "name", |args: &Kwargs| {
            Value::from(format!("bye {}", args.get_str("name").unwrap_or_default()))
        })?,
    )?;
    module.insert(
        "helper",
        Implementation::parse("helper", "", |_: &Kwargs| Value::Null)?,
    )?;

    Ok(module)
}

/// Main demo run function
fn run(config: &HookspecConfig) -> HookspecResult<()> {
    tracing::info!("Starting hookspec demo v{}", env!("CARGO_PKG_VERSION"));

    let module = build_namespace()?;
    let invoker = Invoker::new(&config.invocation);
    let kwargs = kwargs! {
        "greet" => "Good morning",
        "name" => "Ada",
    };

    for hook in find_hooks(&module, "greetings") {
        let title = hook.inputs().get_str("title").unwrap_or("untitled");
        let output = invoker.call(hook, &kwargs)?;
        tracing::info!(hook = %hook.hook_name(), title = %title, output = %output, "Hook called");
    }

    invoker.call_all_hooks(&module, "greetings", &kwargs)?;

    if let Some(output) = invoker.call_unique_hook(&module, "farewell", &kwargs)? {
        tracing::info!(output = %output, "Farewell");
    }

    Ok(())
}
