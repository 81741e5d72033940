//! Print the OpenAPI document of mailcode-server as JSON.

use anyhow::Result;
use mailcode_server::docs::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<()> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
