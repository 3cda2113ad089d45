//! Well-known keys shared between the host, the ambient scope, and the
//! enrichment stages.

/// Keys the host logging integration writes into the ambient invocation scope.
pub mod scope {
    /// Id of the running function invocation.
    pub const INVOCATION_ID: &str = "MS_FunctionInvocationId";
    /// Name of the running function.
    pub const FUNCTION_NAME: &str = "MS_FunctionName";
    /// Logger category.
    pub const CATEGORY: &str = "MS_CategoryName";
    /// Log level of the emitting log call.
    pub const LOG_LEVEL: &str = "MS_LogLevel";
    /// Numeric event id; `0` means unset.
    pub const EVENT_ID: &str = "MS_EventId";
    /// Event name.
    pub const EVENT_NAME: &str = "MS_EventName";
}

/// Keys written into a record's property bag.
pub mod property {
    pub const INVOCATION_ID: &str = "InvocationId";
    pub const PROCESS_ID: &str = "ProcessId";
    pub const CATEGORY: &str = "Category";
    pub const LOG_LEVEL: &str = "LogLevel";
    pub const EVENT_ID: &str = "EventId";
    pub const EVENT_NAME: &str = "EventName";
    pub const HTTP_METHOD: &str = "HttpMethod";
    pub const HTTP_PATH: &str = "HttpPath";
    pub const SUCCEEDED: &str = "Succeeded";
}

/// Activity tags with a dedicated field mapping.
pub mod tag {
    /// Sets both the operation name and the request display name.
    pub const NAME: &str = "Name";
    /// Sets the request success flag.
    pub const SUCCEEDED: &str = "Succeeded";
    /// Sets the context source IP.
    pub const CLIENT_IP: &str = "ClientIp";

    /// Library-internal tags. Never copied into the property bag.
    pub const RESERVED_PREFIX: &str = "ai_";
}
