use pageswap_router::{error::TemplateError, template::TemplateProcessor};
use serde::Serialize;
use web_sys::Element;

use crate::hooks::IconReplace;

/// Render a registered template into `container`, replacing its content, and refresh the icons.
pub fn render_page<T: Serialize>(
    templates: &TemplateProcessor,
    name: &str,
    data: &T,
    container: &Element,
) -> Result<(), TemplateError> {
    let data = serde_json::to_value(data)?;
    let html = templates.render(name, &data)?;
    container.set_inner_html(&html);
    IconReplace::replace_icons();
    Ok(())
}
