//! Chart-ready JSON specifications over the loaded corpus.
//!
//! The rendering layer is external: this module only computes aggregates and
//! shapes them as plotly-style `data`/`layout` specs with stable DOM ids.

use serde::Serialize;

use crate::corpus::corpus::LabeledCorpus;
use crate::corpus::stats::{category_distribution, most_frequent_tokens};

/// Number of tokens shown in the frequency chart.
const TOP_TOKENS: usize = 10;

/// A single renderer-consumable chart specification.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One data trace within a chart.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie {
        labels: Vec<String>,
        values: Vec<usize>,
    },
    Bar {
        x: Vec<String>,
        y: Vec<usize>,
    },
}

/// Chart layout metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: String,
}

/// The dashboard payload: chart specs plus their DOM ids.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub ids: Vec<String>,
    pub graphs: Vec<ChartSpec>,
}

fn pie(title: &str, labels: [&str; 2], values: [usize; 2]) -> ChartSpec {
    ChartSpec {
        data: vec![Trace::Pie {
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values: values.to_vec(),
        }],
        layout: Layout {
            title: title.to_string(),
        },
    }
}

/// Build the dashboard over the corpus; `None` when there is no data to show.
///
/// Charts for the `related` and `offer` categories appear only when those
/// columns exist in the loaded corpus.
pub fn build_dashboard(corpus: &LabeledCorpus) -> Option<DashboardResponse> {
    if corpus.is_empty() {
        return None;
    }

    let mut graphs = Vec::new();

    if let Some(related) = category_distribution(corpus, "related") {
        graphs.push(pie(
            "Distribution of Related Messages",
            ["Related", "Not Related"],
            [related.positive, related.negative],
        ));
    }

    if let Some(offer) = category_distribution(corpus, "offer") {
        graphs.push(pie(
            "Distribution of Offers",
            ["No Offer", "Offer"],
            [offer.negative, offer.positive],
        ));
    }

    let top = most_frequent_tokens(corpus, TOP_TOKENS);
    let (x, y): (Vec<String>, Vec<usize>) = top.into_iter().unzip();
    graphs.push(ChartSpec {
        data: vec![Trace::Bar { x, y }],
        layout: Layout {
            title: "Most Frequent Words".to_string(),
        },
    });

    let ids = (0..graphs.len()).map(|i| format!("graph-{i}")).collect();
    Some(DashboardResponse { ids, graphs })
}
