use serde_json::{Value, json};

use crate::{
    management::FeatureCache,
    utils::{self, UNKNOWN_KEY},
};

const CHARTS_LOADER: &str = "https://www.gstatic.com/charts/loader.js";
const BAR_COLOR: &str = "#6AE368";

/// Name of the JavaScript function drawing a feature's chart, e.g.
/// `draw_Time_Signature`.
pub fn function_name(feature: &str) -> String {
    format!("draw_{}", utils::title_case(feature))
}

/// Chart heading, e.g. `TIME SIGNATURE`.
pub fn chart_title(feature: &str) -> String {
    feature.to_uppercase().replace('_', " ")
}

/// Loads Google Charts and defines one draw function per feature.
pub fn chart_scripts(features: &[String], cache: &FeatureCache) -> String {
    let mut js = String::new();
    js.push_str(&format!(
        "<script type='text/javascript' src='{}'></script>\n",
        CHARTS_LOADER
    ));
    js.push_str("<script type='text/javascript'>\n");
    js.push_str("google.charts.load('current', {'packages':['corechart']});\n");
    for feature in features {
        js.push_str(&format!(
            "google.charts.setOnLoadCallback({});\n",
            function_name(feature)
        ));
    }
    for feature in features {
        js.push_str(&draw_function(feature, cache));
        js.push('\n');
    }
    js.push_str("</script>\n");
    js
}

/// Horizontal bar chart of one feature, one bar per track that reports it.
///
/// The `key` chart carries an annotation column with the key name of every
/// bar.
pub fn draw_function(feature: &str, cache: &FeatureCache) -> String {
    let label = utils::title_case(feature);
    let rows = cache.feature_rows(feature);

    let data = if feature == "key" {
        let mut table: Vec<Value> = vec![json!([label, "Value", { "role": "annotation" }])];
        table.extend(
            rows.iter()
                .map(|(title, value)| json!([title, value, key_annotation(*value)])),
        );
        format!(
            "var data = google.visualization.arrayToDataTable({});",
            utils::script_json(&Value::Array(table))
        )
    } else {
        let table: Vec<Value> = rows
            .iter()
            .map(|(title, value)| json!([title, value]))
            .collect();
        format!(
            "var data = new google.visualization.DataTable();\
             data.addColumn('string', '{label}');\
             data.addColumn('number', 'Value');\
             data.addRows({rows});",
            label = label,
            rows = utils::script_json(&Value::Array(table))
        )
    };

    format!(
        "function {name}() {{{data}\
         var barchart_options = {{title: '{title}', titleTextStyle: {{fontSize: 20}}, \
         width: 550, height: 600, colors: ['{color}'], legend: 'none'}};\
         var barchart = new google.visualization.BarChart(document.getElementById('{id}'));\
         barchart.draw(data, barchart_options);}}",
        name = function_name(feature),
        data = data,
        title = chart_title(feature),
        color = BAR_COLOR,
        id = feature,
    )
}

pub fn key_annotation(value: f64) -> &'static str {
    utils::key_name(value).unwrap_or(UNKNOWN_KEY)
}
