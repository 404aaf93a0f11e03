//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Token lifetime in hours. Fixed at issuance; there is no refresh flow.
pub const TOKEN_TTL_HOURS: i64 = 1;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// Bootstrap
// =============================================================================

/// Login of the admin account seeded into an empty store
pub const BOOTSTRAP_ADMIN_LOGIN: &str = "admin";

/// Display name of the seeded admin account
pub const BOOTSTRAP_ADMIN_NAME: &str = "Administrator";

/// Audit principal recorded for system-initiated operations
pub const SYSTEM_PRINCIPAL: &str = "system";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://user_registry.db?mode=rwc";

// =============================================================================
// Token claims
// =============================================================================

/// Default token issuer name
pub const DEFAULT_JWT_ISSUER: &str = "user-registry";

/// Default token audience name
pub const DEFAULT_JWT_AUDIENCE: &str = "user-registry-clients";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;
