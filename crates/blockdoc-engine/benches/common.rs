// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_product_markup(sections: usize) -> String {
    let base = "<h2>Features</h2>\
        <p>Solid oak top with a <strong>steel</strong> frame.</p>\
        <div style=\"text-align: center;\"><img src=\"/img/desk.jpg\" alt=\"Desk\" /><p><em>Front</em></p></div>\
        <ul><li>Cable tray</li><li>Adjustable feet</li></ul>\
        <table><thead><tr><th>Size</th><th>Width</th></tr></thead><tbody><tr><td>S</td><td>120cm</td></tr></tbody></table>\
        <blockquote><p>Rock solid.</p><cite>— Sam</cite></blockquote>\
        <hr />\n";
    base.repeat(sections)
}
