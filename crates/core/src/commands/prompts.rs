use serde_json::{json, Value};

use crate::{
    errors::{OptimizerError, Result},
    history::HistoryQuery,
    optimizer::{Category, OptimizationRequest, Target},
    runtime,
    service::ensure_prompt,
};

use super::service;

fn str_arg<'a>(args: &'a Value, command: &str, key: &str) -> Result<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| OptimizerError::invalid_args(command, format!("Missing {key}")))
}

fn opt_str_arg<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(|v| v.as_str())
}

pub fn optimize(args: Value) -> Result<Value> {
    let prompt = str_arg(&args, "prompts.optimize", "prompt")?;
    let category = str_arg(&args, "prompts.optimize", "category")?;
    let request = OptimizationRequest {
        prompt:   prompt.to_string(),
        category: Category::parse(category),
        target:   Target::picked(opt_str_arg(&args, "target")),
    };
    ensure_prompt(&request.prompt)?;

    // The service lock is not held across the latency wait
    let response = runtime::block_on(async {
        let optimizer = service()?.lock().await.optimizer().clone();
        Ok::<_, OptimizerError>(optimizer.optimize(&request).await)
    })?;

    Ok(json!(response))
}

pub fn save(args: Value) -> Result<Value> {
    let original = str_arg(&args, "prompts.save", "original")?;
    let optimized = str_arg(&args, "prompts.save", "optimized")?;
    let category = Category::parse(str_arg(&args, "prompts.save", "category")?);
    let tags = match args.get("tags") {
        None | Some(Value::Null) => vec![category.to_string()],
        Some(Value::Array(arr)) => arr
            .iter()
            .map(|v| {
                v.as_str().map(String::from).ok_or_else(|| {
                    OptimizerError::invalid_args("prompts.save", format!("tag is not a string: {v}"))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(OptimizerError::invalid_args(
                "prompts.save",
                format!("tags must be an array of strings, got {other}"),
            ))
        }
    };

    let record = runtime::block_on(async {
        let mut service = service()?.lock().await;
        service.save(original, optimized, category, tags)
    })?;

    Ok(json!(record))
}

pub fn list(_args: Value) -> Result<Value> {
    let prompts = runtime::block_on(async {
        let service = service()?.lock().await;
        Ok::<_, OptimizerError>(service.list().to_vec())
    })?;
    Ok(json!({ "prompts": prompts }))
}

pub fn history(mut args: Value) -> Result<Value> {
    // "all" is the views' sentinel for no category filter
    if let Some(map) = args.as_object_mut() {
        if map.get("category").and_then(|v| v.as_str()) == Some("all") {
            map.remove("category");
        }
    }

    let query: HistoryQuery = if args.is_null() {
        HistoryQuery::default()
    } else {
        serde_json::from_value(args)
            .map_err(|e| OptimizerError::invalid_args("prompts.history", e.to_string()))?
    };

    let prompts = runtime::block_on(async {
        let service = service()?.lock().await;
        Ok::<_, OptimizerError>(service.history(&query))
    })?;
    Ok(json!({ "prompts": prompts }))
}

pub fn stats(_args: Value) -> Result<Value> {
    let stats = runtime::block_on(async {
        let service = service()?.lock().await;
        Ok::<_, OptimizerError>(service.stats())
    })?;
    Ok(json!(stats))
}

pub fn delete(args: Value) -> Result<Value> {
    let id = str_arg(&args, "prompts.delete", "id")?;

    runtime::block_on(async {
        let mut service = service()?.lock().await;
        service.delete(id)
    })?;

    Ok(json!({ "success": true }))
}

pub fn rate(args: Value) -> Result<Value> {
    let id = str_arg(&args, "prompts.rate", "id")?;
    let rating = args
        .get("rating")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| OptimizerError::invalid_args("prompts.rate", "Missing rating"))?;
    let rating = u8::try_from(rating)
        .map_err(|_| OptimizerError::validation(format!("rating out of range: {rating}")))?;

    runtime::block_on(async {
        let mut service = service()?.lock().await;
        service.rate(id, rating)
    })?;

    Ok(json!({ "success": true }))
}
