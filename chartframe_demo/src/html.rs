// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use chartframe_charts::chartframe_dom::escape_xml;

/// One titled chart on the report page.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
}

/// Wraps rendered charts in a standalone HTML page.
pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let title = escape_xml(title);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{title}</title>\n"));
    out.push_str(
        "<style>\n\
         body { font-family: sans-serif; margin: 2em; color: #222; }\n\
         section { margin-bottom: 2em; }\n\
         figure { margin: 0; }\n\
         </style>\n",
    );
    out.push_str("</head>\n<body>\n");
    out.push_str(&format!("<h1>{title}</h1>\n"));
    for section in sections {
        out.push_str("<section>\n");
        out.push_str(&format!("<h2>{}</h2>\n", escape_xml(&section.title)));
        if !section.description.is_empty() {
            out.push_str(&format!("<p>{}</p>\n", escape_xml(&section.description)));
        }
        out.push_str("<figure>");
        out.push_str(&section.svg);
        out.push_str("</figure>\n</section>\n");
    }
    out.push_str("</body>\n</html>\n");
    out
}
