//! Interactive dashboard — a numeric KPI form over the compute endpoint,
//! rendered server-side with the demo defaults pre-filled.

use axum::response::Html;
use revlens_core::types::{Factor, KpiSnapshot, SnapshotPair};

/// GET / — the interactive report page.
pub async fn dashboard() -> Html<String> {
    Html(render_page(&SnapshotPair::demo()))
}

fn form_section(title: &str, timeframe: &str, snapshot: &KpiSnapshot) -> String {
    let mut inputs = String::new();
    for (factor, (name, value)) in Factor::ALL.iter().zip(snapshot.fields()) {
        inputs.push_str(&format!(
            "<label>{} ({timeframe})<input type=\"number\" step=\"any\" \
             id=\"{timeframe}-{name}\" value=\"{value}\"></label>\n",
            factor.label()
        ));
    }
    format!("<fieldset>\n<legend>{title}</legend>\n{inputs}</fieldset>\n")
}

fn render_page(defaults: &SnapshotPair) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Revenue Lens</title>\n<style>\n");
    html.push_str(PAGE_STYLE);
    html.push_str("</style>\n</head>\n<body>\n<h1>Revenue Lens</h1>\n");
    html.push_str(
        "<p>Enter KPIs from two timeframes to see which factor moved your app revenue.</p>\n",
    );
    html.push_str("<form onsubmit=\"return false\">\n");
    html.push_str(&form_section("Old Timeframe", "old", &defaults.old));
    html.push_str(&form_section("New Timeframe", "new", &defaults.new));
    html.push_str("<button id=\"calculate\" type=\"button\">Calculate</button>\n</form>\n");
    html.push_str("<p id=\"error\" class=\"error\"></p>\n");
    html.push_str(
        "<section class=\"cards\">\n\
         <div class=\"card\"><h2>Old Revenue</h2><p id=\"revenue-old\"></p></div>\n\
         <div class=\"card\"><h2>New Revenue</h2><p id=\"revenue-new\"></p>\
         <p id=\"delta\" class=\"delta\"></p></div>\n\
         <div class=\"card\"><h2>Model Quality</h2><p id=\"quality\"></p></div>\n\
         </section>\n",
    );
    html.push_str("<h2>Impact by Factor</h2>\n<section id=\"chart\" class=\"chart\"></section>\n");
    html.push_str(
        "<details>\n<summary>Detailed Calculations</summary>\n<ul id=\"breakdown\"></ul>\n</details>\n",
    );
    html.push_str("<script>\n");
    html.push_str(PAGE_SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");
    html
}

const PAGE_STYLE: &str = "\
body { font-family: sans-serif; max-width: 720px; margin: 2rem auto; color: #222; }
fieldset { border: 1px solid #ddd; border-radius: 8px; margin-bottom: 1rem; }
label { display: inline-block; margin: 0.4rem 0.8rem 0.4rem 0; }
label input { display: block; width: 9rem; padding: 0.25rem; }
button { padding: 0.5rem 1.5rem; }
.error { color: #c62828; }
.cards { display: flex; gap: 1rem; }
.card { flex: 1; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; }
.card h2 { margin: 0; font-size: 0.85rem; color: #666; }
.card p { margin: 0.25rem 0 0; font-size: 1.4rem; }
.card .delta { font-size: 0.9rem; }
.delta.gain { color: #2e7d32; }
.delta.loss { color: #c62828; }
.chart .row { display: flex; align-items: center; gap: 0.5rem; margin: 0.3rem 0; }
.chart .label { width: 7rem; }
.chart .track { flex: 1; background: #f2f2f2; border-radius: 4px; }
.chart .bar { height: 1.1rem; border-radius: 4px; }
.bar.gain { background: #2e7d32; }
.bar.loss { background: #c62828; }
.chart .amount { width: 7rem; text-align: right; font-variant-numeric: tabular-nums; }
details { margin-top: 1.5rem; }
";

const PAGE_SCRIPT: &str = r#"
const FIELDS = ['impressions', 'cpm', 'iap_price', 'iap_sales', 'iap_refund'];
const LABELS = {
  impressions: 'Impressions',
  cpm: 'CPM',
  iap_price: 'IAP Price',
  iap_sales: 'IAP Sales',
  iap_refund: 'IAP Refund',
};

function money(value) {
  const sign = value < 0 ? '-' : '';
  return '$' + sign + Math.abs(value).toLocaleString('en-US', {
    minimumFractionDigits: 2,
    maximumFractionDigits: 2,
  });
}

function snapshot(timeframe) {
  const data = {};
  for (const field of FIELDS) {
    data[field] = parseFloat(document.getElementById(timeframe + '-' + field).value) || 0;
  }
  return data;
}

async function calculate() {
  const body = { old: snapshot('old'), new: snapshot('new') };
  const response = await fetch('/v1/impact', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify(body),
  });
  if (!response.ok) {
    const err = await response.json();
    document.getElementById('error').textContent = err.message;
    return;
  }
  document.getElementById('error').textContent = '';
  render(await response.json());
}

function render(result) {
  document.getElementById('revenue-old').textContent = money(result.revenue_old);
  document.getElementById('revenue-new').textContent = money(result.revenue_new);
  const delta = document.getElementById('delta');
  delta.textContent = money(result.difference_observed);
  delta.className = 'delta ' + (result.difference_observed > 0 ? 'gain' : 'loss');
  document.getElementById('quality').textContent = result.model_quality.toFixed(1) + '%';

  const impacts = result.impacts.map(i => ({ label: LABELS[i.factor], amount: i.amount }));
  const ranked = impacts.slice().sort((a, b) => Math.abs(b.amount) - Math.abs(a.amount));
  const max = ranked.length ? Math.abs(ranked[0].amount) : 0;
  const chart = document.getElementById('chart');
  chart.innerHTML = '';
  for (const row of ranked) {
    const pct = max > 0 ? Math.abs(row.amount) / max * 100 : 0;
    const div = document.createElement('div');
    div.className = 'row';
    div.innerHTML = '<span class="label">' + row.label + '</span>' +
      '<div class="track"><div class="bar ' + (row.amount > 0 ? 'gain' : 'loss') +
      '" style="width:' + pct + '%"></div></div>' +
      '<span class="amount">' + money(row.amount) + '</span>';
    chart.appendChild(div);
  }

  const lines = [
    ['Old Revenue', money(result.revenue_old)],
    ['New Revenue', money(result.revenue_new)],
    ['Observed Difference', money(result.difference_observed)],
    ['Explained Difference', money(result.difference_explained)],
  ];
  for (const row of impacts) {
    lines.push([row.label, money(row.amount)]);
  }
  const list = document.getElementById('breakdown');
  list.innerHTML = '';
  for (const [label, value] of lines) {
    const item = document.createElement('li');
    item.textContent = label + ': ' + value;
    list.appendChild(item);
  }
}

document.getElementById('calculate').addEventListener('click', calculate);
calculate();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_prefills_demo_defaults() {
        let page = render_page(&SnapshotPair::demo());
        assert!(page.contains("id=\"old-impressions\" value=\"200000\""));
        assert!(page.contains("id=\"old-iap_refund\" value=\"-25\""));
        assert!(page.contains("id=\"new-impressions\" value=\"150000\""));
        assert!(page.contains("id=\"new-iap_refund\" value=\"-60\""));
    }

    #[test]
    fn test_page_has_form_and_result_sections() {
        let page = render_page(&SnapshotPair::demo());
        assert!(page.contains("<legend>Old Timeframe</legend>"));
        assert!(page.contains("<legend>New Timeframe</legend>"));
        assert!(page.contains("id=\"calculate\""));
        assert!(page.contains("id=\"chart\""));
        assert!(page.contains("<summary>Detailed Calculations</summary>"));
        // One labelled input per factor per timeframe.
        assert_eq!(page.matches("<label>").count(), 10);
    }
}
