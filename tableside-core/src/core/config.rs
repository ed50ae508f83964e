use chrono_tz::Tz;

/// How staff-driven order status overrides are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any transition is accepted; backward moves are logged at warn
    /// level for the audit trail.
    #[default]
    Unrestricted,
    /// Only pipeline-forward moves (skipping ahead allowed) plus cancel
    /// from any non-terminal state.
    ForwardOnly,
}

/// Whether items may still be added to a served or settled order
/// (add-on after payment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettledAdditions {
    #[default]
    Allow,
    Reject,
}

/// 核心配置 - 业务策略与默认时区
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | TIMEZONE | UTC | 默认业务时区（租户未配置时使用） |
/// | TRANSITION_POLICY | unrestricted | unrestricted \| forward_only |
/// | SETTLED_ADDITIONS | allow | allow \| reject |
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Fallback business timezone for tenants without one configured
    pub timezone: Tz,
    /// Order status override validation
    pub transition_policy: TransitionPolicy,
    /// Adding items to served/paid orders
    pub settled_additions: SettledAdditions,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            transition_policy: TransitionPolicy::default(),
            settled_additions: SettledAdditions::default(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from environment variables, using defaults
    /// for anything unset or unparseable.
    pub fn from_env() -> Self {
        let timezone = std::env::var("TIMEZONE")
            .ok()
            .and_then(|tz| tz.parse().ok())
            .unwrap_or(Tz::UTC);

        let transition_policy = match std::env::var("TRANSITION_POLICY").ok().as_deref() {
            Some("forward_only") => TransitionPolicy::ForwardOnly,
            _ => TransitionPolicy::Unrestricted,
        };

        let settled_additions = match std::env::var("SETTLED_ADDITIONS").ok().as_deref() {
            Some("reject") => SettledAdditions::Reject,
            _ => SettledAdditions::Allow,
        };

        Self {
            timezone,
            transition_policy,
            settled_additions,
        }
    }
}
