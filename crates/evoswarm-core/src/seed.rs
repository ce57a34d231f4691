//! Initial dashboard contents.
//!
//! Builds the starting agent pool, the static route and stake pool catalog,
//! and the three audit entries every session opens with.

use chrono::{DateTime, Duration, Utc};
use evoswarm_types::{Agent, AgentId, EvolutionPhase, NetworkCounters, PathNode, Route, StakePool};
use rand::Rng;
use rust_decimal::Decimal;

use crate::audit::{self, AuditLog};
use crate::bounded::BoundedLog;
use crate::config::{EngineConfig, SeedConfig};
use crate::series::{SeriesError, SeriesState};
use crate::state::DashboardState;
use crate::tokens;

/// Display names assigned to seeded agents, in order, wrapping around.
pub const AGENT_NAMES: [&str; 10] = [
    "Quetzal-α",
    "Condor-β",
    "Jaguar-γ",
    "Puma-δ",
    "Aguila-ε",
    "Serpiente-ζ",
    "Colibri-η",
    "Mariposa-θ",
    "Lobo-ι",
    "Oso-κ",
];

/// A fresh agent with scores drawn from the seed ranges.
pub fn random_agent(name: &str, config: &SeedConfig, rng: &mut impl Rng) -> Agent {
    Agent {
        id: AgentId::new(),
        name: name.to_owned(),
        generation: config.generation.sample(rng),
        resilience: config.resilience.sample(rng),
        speed: config.speed.sample(rng),
        fitness: config.fitness.sample(rng),
        genome: tokens::random_genome(rng),
    }
}

/// State with the static catalog and configured counters, but no agents
/// and an empty audit log.
pub fn empty_state(config: &EngineConfig) -> Result<DashboardState, SeriesError> {
    Ok(DashboardState {
        agents: Vec::new(),
        series: SeriesState::from_config(&config.series)?,
        breeding_events: BoundedLog::with_capacity(config.breeding.history_capacity),
        audit_log: AuditLog::with_capacity(config.audit.capacity),
        counters: NetworkCounters {
            network_savings_usd: config.counters.network_savings_usd,
            active_agents: config.counters.active_agents,
            efficiency_gain_pct: config.counters.efficiency_gain_pct,
        },
        routes: default_routes(),
        stake_pools: default_stake_pools(),
        evolution_phase: EvolutionPhase::Idle,
        proof_token: None,
    })
}

/// Fully seeded session state.
pub fn seed_dashboard(
    config: &EngineConfig,
    rng: &mut impl Rng,
    now: DateTime<Utc>,
) -> Result<DashboardState, SeriesError> {
    let mut state = empty_state(config)?;

    state.agents = AGENT_NAMES
        .iter()
        .cycle()
        .take(config.seed.initial_agents)
        .map(|name| random_agent(name, &config.seed, rng))
        .collect();

    let opening = [
        ("Evolutionary Agent Verification", "soroban_evo_verify_v2", 0),
        ("Cross-Border Remittance Settlement", "soroban_settle_main", 1),
        ("Inflation Oracle Update", "soroban_oracle_latam", 2),
    ];
    for (action, contract, hours_ago) in opening {
        state
            .audit_log
            .seed(audit::verified_entry(action, contract, now - Duration::hours(hours_ago), rng));
    }

    tracing::info!(
        agents = state.agents.len(),
        routes = state.routes.len(),
        stake_pools = state.stake_pools.len(),
        audit_entries = state.audit_log.len(),
        "dashboard seeded"
    );

    Ok(state)
}

fn node(currency: &str, amount: Decimal, country: &str, flag: &str) -> PathNode {
    PathNode {
        currency: currency.to_owned(),
        amount,
        country: country.to_owned(),
        flag: flag.to_owned(),
    }
}

/// The static remittance routes. The route with the lowest slippage is
/// flagged as selected.
pub fn default_routes() -> Vec<Route> {
    let origin = || node("USD", Decimal::from(1000), "United States", "🇺🇸");
    let stellar = || node("XLM", Decimal::new(854_732, 2), "Stellar Network", "⭐");

    let mut routes = vec![
        Route {
            id: "route-1".to_owned(),
            nodes: vec![
                origin(),
                stellar(),
                node("USDC", Decimal::new(99_950, 2), "Circle", "🔵"),
                node("ARST", Decimal::from(924_500), "Argentina", "🇦🇷"),
            ],
            slippage_pct: Decimal::new(12, 2),
            fee_xlm: Decimal::new(1, 3),
            selected: false,
        },
        Route {
            id: "route-2".to_owned(),
            nodes: vec![
                origin(),
                stellar(),
                node("CLPX", Decimal::from(925_000), "Chile", "🇨🇱"),
            ],
            slippage_pct: Decimal::new(18, 2),
            fee_xlm: Decimal::new(2, 3),
            selected: false,
        },
        Route {
            id: "route-3".to_owned(),
            nodes: vec![
                origin(),
                node("USDC", Decimal::new(99_980, 2), "Circle", "🔵"),
                node("MXN", Decimal::from(17_850), "Mexico", "🇲🇽"),
            ],
            slippage_pct: Decimal::new(25, 2),
            fee_xlm: Decimal::new(3, 3),
            selected: false,
        },
    ];
    select_lowest_slippage(&mut routes);
    routes
}

/// Flag exactly one route, the one with the lowest slippage, as selected.
pub fn select_lowest_slippage(routes: &mut [Route]) {
    let best = routes
        .iter()
        .enumerate()
        .min_by_key(|(_, r)| r.slippage_pct)
        .map(|(i, _)| i);
    for (i, route) in routes.iter_mut().enumerate() {
        route.selected = Some(i) == best;
    }
}

/// The static regional stake pools.
pub fn default_stake_pools() -> Vec<StakePool> {
    let pool = |id: &str, name: &str, agents, staked, apy, performance| StakePool {
        id: id.to_owned(),
        name: name.to_owned(),
        agents,
        total_staked_xlm: staked,
        apy_pct: apy,
        performance,
    };
    vec![
        pool("pool-1", "Swarm Andino", 256, 125_000, Decimal::new(125, 1), 94),
        pool("pool-2", "Swarm Azteca", 384, 187_500, Decimal::new(152, 1), 89),
        pool("pool-3", "Swarm Austral", 192, 95_000, Decimal::new(108, 1), 97),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use evoswarm_types::{AuditStatus, GENOME_LENGTH, MAX_SCORE};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    #[test]
    fn seeds_six_named_agents_within_ranges() {
        let config = EngineConfig::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let state = seed_dashboard(&config, &mut rng, Utc::now()).unwrap();

        assert_eq!(state.agents.len(), 6);
        for (agent, name) in state.agents.iter().zip(AGENT_NAMES) {
            assert_eq!(agent.name, name);
            assert!((1..=50).contains(&agent.generation));
            assert!((60..=99).contains(&agent.resilience));
            assert!((60..=99).contains(&agent.speed));
            assert!((70..=99).contains(&agent.fitness));
            assert!(agent.fitness <= MAX_SCORE);
            assert_eq!(agent.genome.len(), GENOME_LENGTH);
        }
        assert_eq!(state.evolution_phase, EvolutionPhase::Idle);
        assert!(state.proof_token.is_none());
        assert!(state.breeding_events.is_empty());
    }

    #[test]
    fn names_wrap_around_for_large_pools() {
        let mut config = EngineConfig::default();
        config.seed.initial_agents = 12;
        let mut rng = SmallRng::seed_from_u64(1);
        let state = seed_dashboard(&config, &mut rng, Utc::now()).unwrap();
        assert_eq!(state.agents[10].name, "Quetzal-α");
        assert_eq!(state.agents[11].name, "Condor-β");
    }

    #[test]
    fn opening_audit_entries_are_newest_first() {
        let now = Utc::now();
        let mut rng = SmallRng::seed_from_u64(2);
        let state = seed_dashboard(&EngineConfig::default(), &mut rng, now).unwrap();
        let entries = state.audit_log.to_vec();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].contract, "soroban_evo_verify_v2");
        assert_eq!(entries[0].created_at, now);
        assert_eq!(entries[1].created_at, now - Duration::hours(1));
        assert_eq!(entries[2].contract, "soroban_oracle_latam");
        assert!(entries.iter().all(|e| e.status == AuditStatus::Verified));
    }

    #[test]
    fn exactly_one_route_selected() {
        let routes = default_routes();
        assert_eq!(routes.len(), 3);
        let selected: Vec<&str> = routes
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(selected, vec!["route-1"]);
    }

    #[test]
    fn reselects_when_slippage_changes() {
        let mut routes = default_routes();
        routes[2].slippage_pct = Decimal::new(5, 2);
        select_lowest_slippage(&mut routes);
        assert!(!routes[0].selected);
        assert!(routes[2].selected);
    }

    #[test]
    fn counters_follow_config() {
        let mut config = EngineConfig::default();
        config.counters.network_savings_usd = 12;
        let state = empty_state(&config).unwrap();
        assert_eq!(state.counters.network_savings_usd, 12);
        assert_eq!(state.counters.active_agents, 1024);
        assert_eq!(state.stake_pools.len(), 3);
        assert!(state.agents.is_empty());
        assert!(state.audit_log.is_empty());
    }
}
