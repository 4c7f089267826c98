//! Command registry and dispatch system
//!
//! The host UI calls into the core by command name with JSON arguments.
//! Commands are registered as "category.action" (e.g. "prompts.optimize",
//! "prompts.rate") and dispatched to handler functions.
//!
//! Prompt commands need a service installed by [`setup`] first.
//!
//! ## Adding a new command
//!
//! 1. Create handler function: `pub fn my_command(args: Value) -> Result<Value>`
//! 2. Register in `REGISTRY`: `("category.action", my_command as CommandHandler)`
//! 3. Add tests for the command

use std::collections::HashMap;
use std::sync::OnceLock;

use log::info;
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::{
    config::Config,
    errors::{OptimizerError, Result},
    service::PromptService,
};

pub mod prompts;

/// Type alias for command handler functions
///
/// All command handlers take a JSON Value (arguments) and return a Result<Value>
pub type CommandHandler = fn(Value) -> Result<Value>;

static SERVICE: OnceLock<Mutex<PromptService>> = OnceLock::new();

/// Static command registry
///
/// Maps command names to handler functions. Initialized lazily on first access.
static REGISTRY: Lazy<HashMap<&'static str, CommandHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Test command
    map.insert("ping", ping as CommandHandler);

    // Prompt commands
    map.insert("prompts.optimize", prompts::optimize as CommandHandler);
    map.insert("prompts.save", prompts::save as CommandHandler);
    map.insert("prompts.list", prompts::list as CommandHandler);
    map.insert("prompts.history", prompts::history as CommandHandler);
    map.insert("prompts.stats", prompts::stats as CommandHandler);
    map.insert("prompts.delete", prompts::delete as CommandHandler);
    map.insert("prompts.rate", prompts::rate as CommandHandler);

    map
});

/// Install the process-wide prompt service
///
/// `config` is a JSON object in [`Config`] shape; `null` uses defaults.
/// Calling it again after a successful setup is a no-op.
pub fn setup(config: Value) -> Result<Value> {
    if SERVICE.get().is_some() {
        return Ok(json!({ "success": true, "alreadyInitialized": true }));
    }

    let config = Config::from_value(config)?;
    install(&config)
}

/// Like [`setup`], with the config read from the environment
pub fn setup_from_env() -> Result<Value> {
    if SERVICE.get().is_some() {
        return Ok(json!({ "success": true, "alreadyInitialized": true }));
    }

    let config = Config::from_env()?;
    install(&config)
}

fn install(config: &Config) -> Result<Value> {
    let service = PromptService::from_config(config)?;
    let records = service.store().len();

    // A concurrent setup may have won the race; keep the first one
    if SERVICE.set(Mutex::new(service)).is_err() {
        info!("prompt service already installed, discarding duplicate setup");
        return Ok(json!({ "success": true, "alreadyInitialized": true }));
    }
    info!("prompt service ready (records={})", records);

    Ok(json!({ "success": true, "records": records }))
}

/// The service installed by [`setup`]
pub(crate) fn service() -> Result<&'static Mutex<PromptService>> {
    SERVICE.get().ok_or(OptimizerError::NotInitialized)
}

/// Dispatch a command by name
///
/// Looks up the command in the registry and executes it with the provided arguments.
///
/// # Arguments
/// * `command` - Command name (e.g., "ping", "prompts.list")
/// * `args` - Command arguments as JSON Value
///
/// # Returns
/// Command result as JSON Value, or error if command not found
pub fn dispatch(command: &str, args: Value) -> Result<Value> {
    match REGISTRY.get(command) {
        Some(handler) => handler(args),
        None => Err(OptimizerError::CommandNotFound(command.to_string())),
    }
}

/// List all available commands
///
/// Returns a sorted list of all registered command names.
pub fn list_commands() -> Vec<String> {
    let mut commands: Vec<String> = REGISTRY.keys().map(|&k| k.to_string()).collect();
    commands.sort();
    commands
}

/// Error payload returned to the host instead of a failed result
///
/// Fields: `error` (always true), `message` (user-facing), `category`.
pub fn error_payload(err: &OptimizerError) -> Value {
    json!({
        "error": true,
        "message": err.user_message(),
        "category": err.category(),
    })
}

/// Dispatch and fold any error into [`error_payload`]
pub fn call(command: &str, args: Value) -> Value {
    match dispatch(command, args) {
        Ok(result) => result,
        Err(err) => error_payload(&err),
    }
}

// ============================================================================
// Test Commands
// ============================================================================

/// Ping command - simple test to verify command dispatch works
///
/// Returns the input arguments with an added "pong" field.
///
/// # Example
/// ```json
/// // Input:  {"message": "hello"}
/// // Output: {"message": "hello", "pong": true}
/// ```
fn ping(args: Value) -> Result<Value> {
    let mut result = match args {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    result.insert("pong".to_string(), Value::Bool(true));
    Ok(Value::Object(result))
}
