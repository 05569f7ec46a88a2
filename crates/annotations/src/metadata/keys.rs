/// Metadata key under which constructor parameter tags are stored
pub const PARAM_TAGS: &str = "elif:tagged";

/// Metadata key under which property tags are stored
pub const PROPERTY_TAGS: &str = "elif:tagged_props";

/// Metadata key under which constructor parameter types are stored
pub const PARAM_TYPES: &str = "elif:paramtypes";

/// Service identifier to inject at the tagged point
pub const INJECT_TAG: &str = "inject";

/// Service identifier to inject as a list of all bound services
pub const MULTI_INJECT_TAG: &str = "multi_inject";

/// Binding name constraint
pub const NAMED_TAG: &str = "named";

/// Name of the injected target, used in diagnostics
pub const NAME_TAG: &str = "name";

/// Parameter is supplied by the caller rather than the container
pub const UNMANAGED_TAG: &str = "unmanaged";

/// Resolution may yield nothing for this point
pub const OPTIONAL_TAG: &str = "optional";
