//! HTML page wrapper for SVG diagrams.

/// Id of the JSON data island in the generated page.
const DATA_ID: &str = "slotgraph-data";

/// Wraps `svg` in a minimal standalone page with `data` as a JSON island.
pub(super) fn page(svg: &str, data: &str) -> String {
    // `</` would end the script element early.
    let data = data.replace("</", "<\\/");
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>slotgraph</title>\n\
         </head>\n\
         <body>\n\
         {svg}\n\
         <script type=\"application/json\" id=\"{DATA_ID}\">{data}</script>\n\
         </body>\n\
         </html>\n"
    )
}
