//! Stage handlers: one function per [`EventKind`].
//!
//! Each handler reads and writes the [`SimContext`], may schedule follow-up
//! events, and returns a [`HandlerResult`].  A handler whose property is no
//! longer where the event expects it returns `StaleReference` before
//! touching anything; the driver recovers from that.
//!
//! | Event                | Agent on entry     | Outcomes                                                  |
//! |----------------------|--------------------|-----------------------------------------------------------|
//! | `Arrival`            | —                  | out of hours / no idle property / no agent / visit starts |
//! | `VisitDone`          | blocked            | unconverted / saturated / paperwork                       |
//! | `PaperworkDone`      | blocked            | renegotiation / verification (agent released)             |
//! | `RenegotiationDone`  | blocked            | verification / exhausted (agent released either way)      |
//! | `VerificationDone`   | tracking only      | notarization / wait for agent                             |
//! | `NotarizationRetry`  | tracking only      | notarization / wait again                                 |
//! | `NotarizationDone`   | blocked            | sold (+ replacement listing)                              |

use log::{debug, warn};
use re_core::{AgentId, PropertyId};
use re_entity::PropertyStage;
use re_policy::OutcomePolicy;
use re_queue::EventKind;

use crate::{HandlerError, HandlerResult, LossCause, SimContext};

/// Route one event to its handler.
pub fn dispatch<P: OutcomePolicy>(ctx: &mut SimContext<P>, kind: EventKind) -> HandlerResult<()> {
    match kind {
        EventKind::Arrival => on_arrival(ctx),
        EventKind::VisitDone { property, agent } => on_visit_done(ctx, property, agent),
        EventKind::PaperworkDone { property, agent } => on_paperwork_done(ctx, property, agent),
        EventKind::RenegotiationDone { property, agent } => {
            on_renegotiation_done(ctx, property, agent)
        }
        EventKind::VerificationDone { property, agent } => {
            on_verification_done(ctx, property, agent)
        }
        EventKind::NotarizationRetry { property, agent } => {
            on_notarization_retry(ctx, property, agent)
        }
        EventKind::NotarizationDone { property, agent } => {
            on_notarization_done(ctx, property, agent)
        }
    }
}

// ── Arrival ───────────────────────────────────────────────────────────────────

pub fn on_arrival<P: OutcomePolicy>(ctx: &mut SimContext<P>) -> HandlerResult<()> {
    ctx.counters.arrivals += 1;
    let now = ctx.now();

    // Keep the arrival stream going while one more mean interval still fits.
    if now.minutes() <= ctx.config.horizon_minutes - ctx.arrivals.mean_interval() {
        let gap = ctx.arrivals.next_gap(&mut ctx.rng_arrivals);
        ctx.queue.schedule_after(gap, EventKind::Arrival)?;
    }

    if !ctx.hours.is_open(now) {
        let minute = now.minute_of_day();
        ctx.lose(
            LossCause::OutOfHours,
            format!("visit lost: outside business hours (minute {minute:.0} of the day)"),
        );
        return Ok(());
    }

    let Some(property) = ctx.store.pick_idle(&mut ctx.rng_selection) else {
        ctx.lose(LossCause::NoIdleProperty, "visit lost: no idle property".to_owned());
        return Ok(());
    };
    ctx.store.active_mut(property)?.visits += 1;

    let Some(agent) = ctx.store.agents.find_available() else {
        ctx.lose(LossCause::NoAgent, format!("visit to {property} lost: no agent available"));
        return Ok(());
    };

    if !ctx.store.agents.block(agent, property, now) {
        ctx.counters.double_block_attempts += 1;
        warn!("{agent} offered for {property} while already blocked");
        ctx.lose(LossCause::NoAgent, format!("visit to {property} lost: {agent} busy"));
        return Ok(());
    }
    ctx.store.transition(property, PropertyStage::Visiting)?;
    let p = ctx.store.active_mut(property)?;
    p.last_visit_at = Some(now);
    p.agent = Some(agent);

    let visit = ctx.config.durations.visit_total();
    ctx.queue.schedule_after(visit, EventKind::VisitDone { property, agent })?;
    debug!("{now}: {agent} starts visit to {property}");
    ctx.routine(format!("{agent} starts visit to {property}"));
    Ok(())
}

// ── Visit → paperwork ─────────────────────────────────────────────────────────

pub fn on_visit_done<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    expect_stage(ctx, "visit_done", property, agent, PropertyStage::Visiting)?;
    let now = ctx.now();

    let prop = ctx.store.active_mut(property)?;
    let sale = ctx.policy.sale_closes(prop, &mut ctx.rng_outcomes);
    if !sale {
        ctx.store.agents.unblock(agent, now);
        ctx.store.return_to_idle(property)?;
        ctx.lose(LossCause::Unconverted, format!("visit to {property} ended without a sale"));
        return Ok(());
    }

    if !ctx.store.agents.has_verification_capacity(agent) {
        ctx.store.agents.unblock(agent, now);
        ctx.store.return_to_idle(property)?;
        let cap = ctx.store.agents.verification_cap();
        ctx.lose(
            LossCause::VerificationSaturated,
            format!("sale of {property} rejected: {agent} already tracks {cap} verifications"),
        );
        return Ok(());
    }

    ctx.store.transition(property, PropertyStage::Paperwork)?;
    ctx.store.active_mut(property)?.in_sale = true;
    let paperwork = ctx.config.durations.paperwork_total();
    ctx.queue.schedule_after(paperwork, EventKind::PaperworkDone { property, agent })?;
    debug!("{now}: {property} sold on visit, {agent} starts paperwork");
    ctx.critical(format!("SALE agreed for {property} by {agent}; paperwork started"));
    Ok(())
}

// ── Paperwork → renegotiation | verification ─────────────────────────────────

pub fn on_paperwork_done<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    expect_stage(ctx, "paperwork_done", property, agent, PropertyStage::Paperwork)?;

    let prop = ctx.store.active_mut(property)?;
    let regrets = ctx.policy.client_regrets(prop, &mut ctx.rng_outcomes);
    if regrets {
        ctx.counters.remorse += 1;
        ctx.store.transition(property, PropertyStage::Renegotiation)?;
        let renegotiation = ctx.config.durations.renegotiation;
        ctx.queue
            .schedule_after(renegotiation, EventKind::RenegotiationDone { property, agent })?;
        debug!("{}: buyer of {property} regrets, {agent} renegotiates", ctx.now());
        ctx.critical(format!("buyer of {property} regrets; {agent} starts renegotiation"));
        return Ok(());
    }

    enter_verification(ctx, property, agent)
}

// ── Renegotiation → verification | idle ──────────────────────────────────────

pub fn on_renegotiation_done<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    expect_stage(ctx, "renegotiation_done", property, agent, PropertyStage::Renegotiation)?;
    let now = ctx.now();
    let max = ctx.config.max_renegotiations;

    let prop = ctx.store.active_mut(property)?;
    let won = ctx.policy.reengages(prop, max, &mut ctx.rng_outcomes);
    if won {
        prop.renegotiations += 1;
        let attempts = prop.renegotiations;
        ctx.counters.reengagement_wins += 1;
        ctx.critical(format!(
            "renegotiation of {property} succeeded (attempt {attempts} of {max})"
        ));
        return enter_verification(ctx, property, agent);
    }

    ctx.store.agents.unblock(agent, now);
    if ctx.config.expire_on_failed_renegotiation {
        ctx.store.mark_lost(property, now)?;
    } else {
        ctx.store.return_to_idle(property)?;
    }
    debug!("{now}: renegotiation of {property} failed");
    ctx.lose(
        LossCause::RenegotiationExhausted,
        format!("renegotiation of {property} failed; sale lost"),
    );
    Ok(())
}

// ── Verification → notarization ───────────────────────────────────────────────

pub fn on_verification_done<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    expect_stage(ctx, "verification_done", property, agent, PropertyStage::Verification)?;
    ctx.store.agents.remove_pending(agent, property);
    ctx.store.active_mut(property)?.passed_verification = true;
    ctx.routine(format!("{property} passed verification"));
    try_notarize(ctx, property, agent)
}

pub fn on_notarization_retry<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    expect_stage(ctx, "notarization_retry", property, agent, PropertyStage::Verification)?;
    try_notarize(ctx, property, agent)
}

// ── Notarization → sold ───────────────────────────────────────────────────────

pub fn on_notarization_done<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    expect_stage(ctx, "notarization_done", property, agent, PropertyStage::Notarization)?;
    let now = ctx.now();

    ctx.store.agents.unblock(agent, now);
    let sold = ctx.store.mark_sold(property, now)?;
    let visits = sold.visits;
    ctx.counters.sold += 1;
    debug!("{now}: {property} sold by {agent}");
    ctx.critical(format!("SOLD {property} by {agent} after {visits} visits"));

    if ctx.config.replenish {
        let fresh = ctx.store.create_replacement(now);
        ctx.counters.replacements_created += 1;
        ctx.routine(format!("new listing {fresh} replaces {property}"));
    }
    Ok(())
}

// ── Shared steps ──────────────────────────────────────────────────────────────

/// Release the agent and start the verification dwell, tracked by `agent`.
fn enter_verification<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    let now = ctx.now();
    ctx.store.agents.unblock(agent, now);
    ctx.store.agents.add_pending(agent, property)?;
    ctx.store.transition(property, PropertyStage::Verification)?;
    let verification = ctx.config.durations.verification;
    ctx.queue
        .schedule_after(verification, EventKind::VerificationDone { property, agent })?;
    ctx.routine(format!("{property} enters verification, tracked by {agent}"));
    Ok(())
}

/// Take a verified property to the notary if its agent is free, otherwise
/// check again after the retry interval.
fn try_notarize<P: OutcomePolicy>(
    ctx: &mut SimContext<P>,
    property: PropertyId,
    agent: AgentId,
) -> HandlerResult<()> {
    let now = ctx.now();
    if !ctx.store.agents.block(agent, property, now) {
        ctx.counters.notarization_retries += 1;
        let retry = ctx.config.notarization_retry_minutes;
        ctx.queue
            .schedule_after(retry, EventKind::NotarizationRetry { property, agent })?;
        ctx.routine(format!("{property} waits for {agent} to reach the notary"));
        return Ok(());
    }

    ctx.store.transition(property, PropertyStage::Notarization)?;
    let notarization = ctx.config.durations.notarization;
    ctx.queue
        .schedule_after(notarization, EventKind::NotarizationDone { property, agent })?;
    ctx.routine(format!("{agent} takes {property} to the notary"));
    Ok(())
}

/// Confirm the event still matches the property's state.
fn expect_stage<P: OutcomePolicy>(
    ctx: &SimContext<P>,
    event: &'static str,
    property: PropertyId,
    agent: AgentId,
    stage: PropertyStage,
) -> HandlerResult<()> {
    match ctx.store.property(property) {
        Some(p) if p.stage == stage && p.agent == Some(agent) => Ok(()),
        _ => Err(HandlerError::StaleReference { event, property, agent }),
    }
}
