//! End-of-run aggregation.
//!
//! [`MetricsReport::collect`] reads the final store and counters once, after
//! terminal reconciliation.  It derives everything else:
//!
//! | Field                     | Definition                                            |
//! |---------------------------|-------------------------------------------------------|
//! | `conversion_rate`         | `sold / arrivals`                                     |
//! | `turnover.rate`           | `sold / (initial + replacements)` with replenishment, `sold / initial` without |
//! | `agents[i].utilization`   | `blocked_minutes / elapsed_minutes`, always in `[0, 1]` |
//! | `open_hours_utilization`  | blocked time over open minutes only; above 1 means overload |
//! | `visits_per_sold`         | visit counts of sold properties                       |
//! | `mean_time_to_sale`       | selling visit start → notarization done               |

use std::collections::BTreeMap;
use std::fmt;

use re_core::{format_hhmm, format_span_hours, AgentId};
use re_entity::PropertyStage;
use re_policy::{CommissionSchedule, OutcomePolicy};
use serde::Serialize;

use crate::{Counters, LossCause, SimContext};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentReport {
    pub agent:                  AgentId,
    pub blocked_minutes:        f64,
    pub utilization:            f64,
    pub open_hours_utilization: Option<f64>,
    pub completed_tasks:        u64,
    pub pending_verifications:  usize,
}

/// Minimum, mean and maximum of a sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Spread {
    pub min:  f64,
    pub mean: f64,
    pub max:  f64,
}

impl Spread {
    /// `None` for an empty sample.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Spread> {
        let mut n = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            n += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (n > 0).then(|| Spread { min, mean: sum / n as f64, max })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisitStats {
    pub min:  u32,
    pub mean: f64,
    pub max:  u32,
    /// visit count → number of sold properties with that count.
    pub histogram: BTreeMap<u32, u64>,
}

/// Sold share of the listings that were available to sell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Turnover {
    /// `"rotation"` with replenishment, `"sale"` without.
    pub label: &'static str,
    pub rate:  f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsReport {
    pub seed:            u64,
    pub elapsed_minutes: f64,
    pub run_length:      String,

    pub counters: Counters,
    /// Arrivals whose property is still mid-funnel.
    pub in_flight: u64,

    pub initial_properties: u64,
    pub active_at_end:      usize,
    pub idle_at_end:        usize,
    pub lost_pool:          usize,

    pub conversion_rate:             f64,
    pub configured_sale_probability: f64,
    pub turnover:                    Turnover,

    pub agents:                 Vec<AgentReport>,
    pub utilization:            Option<Spread>,
    pub open_hours_utilization: Option<Spread>,
    pub overloaded_agents:      usize,

    pub visits_per_sold:           Option<VisitStats>,
    pub mean_time_to_sale_minutes: Option<f64>,
    pub mean_time_to_sale:         Option<String>,

    pub max_renegotiations: u32,
    pub minimum_commission: f64,
    pub forced_releases:    usize,
}

impl MetricsReport {
    pub fn collect<P: OutcomePolicy>(ctx: &SimContext<P>, forced_releases: usize) -> Self {
        let elapsed = ctx.now().minutes();
        let store = &ctx.store;
        let counters = ctx.counters.clone();

        let open_minutes = ctx.hours.open_minutes_in(elapsed);
        let agents: Vec<AgentReport> = store
            .agents
            .ids()
            .map(|agent| AgentReport {
                agent,
                blocked_minutes:        store.agents.blocked_minutes(agent),
                utilization:            store.agents.utilization(agent, elapsed),
                open_hours_utilization: open_minutes
                    .map(|base| store.agents.utilization(agent, base)),
                completed_tasks:        store.agents.completed_tasks(agent),
                pending_verifications:  store.agents.pending_verifications(agent).len(),
            })
            .collect();
        let utilization = Spread::of(agents.iter().map(|a| a.utilization));
        let open_hours_utilization =
            Spread::of(agents.iter().filter_map(|a| a.open_hours_utilization));
        let overloaded_agents = agents
            .iter()
            .filter(|a| a.open_hours_utilization.is_some_and(|u| u > 1.0))
            .count();

        let visits_per_sold = visit_stats(store.sold().map(|p| p.visits));
        let times: Vec<f64> = store.sold().filter_map(|p| p.time_to_sale()).collect();
        let mean_time_to_sale_minutes =
            (!times.is_empty()).then(|| times.iter().sum::<f64>() / times.len() as f64);

        let in_flight = store
            .active()
            .filter(|p| p.stage != PropertyStage::Idle)
            .count() as u64;

        let initial = store.initial_active();
        let turnover = if ctx.config.replenish {
            Turnover {
                label: "rotation",
                rate:  ratio(counters.sold, initial + store.replacements_made()),
            }
        } else {
            Turnover { label: "sale", rate: ratio(counters.sold, initial) }
        };

        let max_renegotiations = ctx.config.max_renegotiations;
        Self {
            seed: ctx.config.seed,
            elapsed_minutes: elapsed,
            run_length: format_span_hours(elapsed / 60.0),
            conversion_rate: ratio(counters.sold, counters.arrivals),
            configured_sale_probability: ctx.config.probabilities.sale,
            counters,
            in_flight,
            initial_properties: initial,
            active_at_end: store.active_count(),
            idle_at_end: store.idle_count(),
            lost_pool: store.lost_count(),
            turnover,
            agents,
            utilization,
            open_hours_utilization,
            overloaded_agents,
            visits_per_sold,
            mean_time_to_sale_minutes,
            mean_time_to_sale: mean_time_to_sale_minutes.map(format_hhmm),
            max_renegotiations,
            minimum_commission: CommissionSchedule::default().minimum_rate(max_renegotiations),
            forced_releases,
        }
    }
}

fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn visit_stats(visits: impl Iterator<Item = u32>) -> Option<VisitStats> {
    let mut histogram = BTreeMap::new();
    let mut total = 0u64;
    let mut n = 0u64;
    for v in visits {
        *histogram.entry(v).or_insert(0u64) += 1;
        total += u64::from(v);
        n += 1;
    }
    let min = *histogram.keys().next()?;
    let max = *histogram.keys().next_back()?;
    Some(VisitStats { min, mean: total as f64 / n as f64, max, histogram })
}

// ── Human-readable summary ────────────────────────────────────────────────────

impl fmt::Display for MetricsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = &self.counters;
        writeln!(f, "=== pipeline simulation (seed {}) ===", self.seed)?;
        writeln!(f, "run length           : {}", self.run_length)?;
        writeln!(f, "arrivals             : {}", c.arrivals)?;
        writeln!(f, "sold                 : {}", c.sold)?;
        for cause in LossCause::ALL {
            writeln!(f, "  lost {:<22}: {}", cause.name(), c.losses(cause))?;
        }
        writeln!(f, "in flight at end     : {}", self.in_flight)?;
        writeln!(
            f,
            "conversion           : {:.4} (configured sale probability {:.4})",
            self.conversion_rate, self.configured_sale_probability
        )?;
        writeln!(f, "{} rate        : {:.4}", self.turnover.label, self.turnover.rate)?;
        writeln!(
            f,
            "remorse / won back   : {} / {}",
            c.remorse, c.reengagement_wins
        )?;
        writeln!(f, "new listings         : {}", c.replacements_created)?;
        if let Some(u) = &self.utilization {
            writeln!(
                f,
                "utilization          : min {:.3}  mean {:.3}  max {:.3}",
                u.min, u.mean, u.max
            )?;
        }
        if let Some(u) = &self.open_hours_utilization {
            writeln!(
                f,
                "open-hours util.     : min {:.3}  mean {:.3}  max {:.3} ({} overloaded)",
                u.min, u.mean, u.max, self.overloaded_agents
            )?;
        }
        if let Some(v) = &self.visits_per_sold {
            writeln!(f, "visits per sale      : min {}  mean {:.2}  max {}", v.min, v.mean, v.max)?;
        }
        if let Some(t) = &self.mean_time_to_sale {
            writeln!(f, "mean time to sale    : {t}")?;
        }
        writeln!(
            f,
            "min commission       : {:.3} % after {} renegotiations",
            self.minimum_commission * 100.0,
            self.max_renegotiations
        )?;
        write!(f, "events processed     : {}", c.events_processed)
    }
}
