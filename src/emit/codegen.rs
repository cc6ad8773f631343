//! Renders a [`ModulePlan`] as a CommonJS module.
//!
//! Every literal goes through `serde_json`, so document text cannot escape
//! its string.

use indexmap::IndexMap;
use serde::Serialize;

use super::plan::{ExportMode, ExportShape, ModulePlan, PrintedOperation};

/// Generate the module source for `plan`.
pub fn render(plan: &ModulePlan) -> String {
    match plan.mode {
        ExportMode::String => render_strings(plan),
        ExportMode::Callable => render_callables(plan),
    }
}

fn render_strings(plan: &ModulePlan) -> String {
    let exported = match (plan.shape(), plan.operations.first()) {
        (ExportShape::Single, Some(op)) => literal(&op.text),
        _ => {
            let texts: IndexMap<&str, &str> = plan
                .operations
                .iter()
                .map(|op| (op.name.as_str(), op.text.as_str()))
                .collect();
            literal(&texts)
        }
    };
    format!("module.exports = {exported};\n")
}

fn render_callables(plan: &ModulePlan) -> String {
    let mut out = String::new();
    out.push_str(&format!("var request = require({});\n", literal(&plan.request)));
    out.push_str(&format!("var url = {};\n", literal(&plan.url)));
    out.push_str(WRAP);
    out.push('\n');

    match (plan.shape(), plan.operations.first()) {
        (ExportShape::Single, Some(op)) => {
            out.push_str(&format!("module.exports = {};\n", wrap_call(op)));
            if plan.debug {
                out.push_str(&format!(
                    "module.exports._debug = {};\n",
                    debug_literal(plan)
                ));
            }
        }
        _ => {
            out.push_str("module.exports = {\n");
            for op in &plan.operations {
                out.push_str(&format!("  {}: {},\n", literal(&op.name), wrap_call(op)));
            }
            let raw: Vec<&str> = plan.operations.iter().map(|op| op.text.as_str()).collect();
            out.push_str(&format!("  _raw: {},\n", literal(&raw)));
            let debug = if plan.debug {
                debug_literal(plan)
            } else {
                "false".to_string()
            };
            out.push_str(&format!("  _debug: {debug}\n"));
            out.push_str("};\n");
        }
    }

    out
}

const WRAP: &str = r#"function wrap(name, type, raw) {
  var req = function (variables, options) {
    var data = {
      operationName: name,
      query: raw,
      variables: variables
    };
    return request(url, data, options);
  };
  req.raw = raw;
  req.type = type;
  return req;
}
"#;

fn wrap_call(op: &PrintedOperation) -> String {
    format!(
        "wrap({}, {}, {})",
        literal(&op.name),
        literal(&op.kind),
        literal(&op.text)
    )
}

fn debug_literal(plan: &ModulePlan) -> String {
    let closures: IndexMap<&str, &[String]> = plan
        .operations
        .iter()
        .map(|op| (op.name.as_str(), op.closure.as_deref().unwrap_or_default()))
        .collect();
    literal(&closures)
}

fn literal<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
