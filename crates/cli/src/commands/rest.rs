//! Ad-hoc REST requests.

use anyhow::{Context, Result, anyhow};
use splunkd_client::HttpMethod;

use crate::commands::CommandContext;
use crate::formatters::format_response;

pub async fn run(
    ctx: &CommandContext,
    method: &str,
    uri: &str,
    params: &[String],
    body: Option<&str>,
) -> Result<()> {
    let method: HttpMethod = method.parse()?;
    let params = parse_params(params)?;

    let mut session = ctx.open_session().await?;
    let response = session
        .execute(method, uri, &params, body)
        .await
        .with_context(|| format!("{method} {uri} failed"))?;

    println!("{}", format_response(&response, ctx.output)?);
    Ok(())
}

/// `key=value` flags into pairs, split at the first `=`.
fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>> {
    raw.iter()
        .map(|item| {
            item.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| anyhow!("Invalid parameter '{item}' (expected KEY=VALUE)"))
        })
        .collect()
}
