//! Built-in capability tables for the engine release this crate is versioned with.
//!
//! Entries are `(type, plugin, stateful, config keys)` for modules and
//! `(type, plugin, config keys)` for steps.

pub(crate) type ModuleEntry = (&'static str, &'static str, bool, &'static [&'static str]);
pub(crate) type StepEntry = (&'static str, &'static str, &'static [&'static str]);

pub(crate) const TRIGGER_TYPES: &[&str] = &["event", "eventbus", "http", "reconciliation", "schedule"];

pub(crate) const MODULE_TYPES: &[ModuleEntry] = &[
    ("storage.s3", "storage", false, &["bucket", "region", "endpoint"]),
    ("storage.local", "storage", false, &["rootDir"]),
    ("storage.gcs", "storage", false, &["bucket", "project", "credentialsFile"]),
    ("storage.sqlite", "storage", true, &["dbPath", "maxConnections", "walMode"]),
    ("database.workflow", "storage", true, &["driver", "dsn", "maxOpenConns", "maxIdleConns"]),
    ("persistence.store", "storage", true, &["database"]),
    ("cache.redis", "storage", false, &["address", "password", "db", "prefix", "defaultTTL"]),
    ("http.server", "http", false, &["address", "readTimeout", "writeTimeout", "idleTimeout"]),
    ("http.router", "http", false, &["prefix", "middleware"]),
    ("http.handler", "http", false, &["contentType", "routes"]),
    ("http.proxy", "http", false, &["target", "stripPrefix"]),
    ("reverseproxy", "http", false, &["target", "stripPrefix"]),
    ("http.simple_proxy", "http", false, &["target"]),
    ("static.fileserver", "http", false, &["root", "index", "spa"]),
    ("http.middleware.auth", "http", false, &["type", "header"]),
    ("http.middleware.logging", "http", false, &["format", "level"]),
    ("http.middleware.ratelimit", "http", false, &["requestsPerMinute", "burstSize"]),
    ("http.middleware.cors", "http", false, &["allowOrigins", "allowMethods", "allowHeaders", "maxAge"]),
    ("http.middleware.requestid", "http", false, &[]),
    ("http.middleware.securityheaders", "http", false, &[]),
    ("auth.jwt", "auth", false, &["secret", "tokenExpiry", "issuer", "seedFile", "responseFormat"]),
    ("auth.user-store", "auth", true, &[]),
    ("auth.oauth2", "auth", false, &["providers"]),
    ("auth.m2m", "auth", false, &["secret", "algorithm", "privateKey", "tokenExpiry", "issuer", "clients"]),
    ("messaging.broker", "messaging", false, &["maxQueueSize", "deliveryTimeout"]),
    ("messaging.broker.eventbus", "messaging", false, &[]),
    ("messaging.handler", "messaging", false, &["topic"]),
    ("messaging.nats", "messaging", false, &["url"]),
    ("messaging.kafka", "messaging", false, &["brokers", "groupId"]),
    ("notification.slack", "messaging", false, &["webhookURL", "channel", "username"]),
    ("webhook.sender", "messaging", false, &["maxRetries"]),
    ("statemachine.engine", "statemachine", true, &["maxInstances", "instanceTTL"]),
    ("state.tracker", "statemachine", true, &["retentionDays"]),
    ("state.connector", "statemachine", false, &[]),
    ("metrics.collector", "observability", false, &["namespace", "subsystem", "metricsPath", "enabledMetrics"]),
    ("health.checker", "observability", false, &["healthPath", "readyPath", "livePath", "checkTimeout", "autoDiscover"]),
    ("log.collector", "observability", false, &["logLevel", "outputFormat", "retentionDays"]),
    ("observability.otel", "observability", false, &["endpoint", "serviceName"]),
    ("openapi.generator", "observability", false, &["title", "version", "description", "servers"]),
    ("http.middleware.otel", "observability", false, &["serverName"]),
    ("api.query", "api", false, &["delegate", "routes"]),
    ("api.command", "api", false, &["delegate", "routes"]),
    ("api.handler", "api", false, &["resourceName", "workflowType", "workflowEngine", "initialTransition", "seedFile", "sourceResourceName", "stateFilter", "fieldMapping", "transitionMap", "summaryFields"]),
    ("api.gateway", "api", false, &["routes", "globalRateLimit", "cors", "auth"]),
    ("workflow.registry", "api", true, &["storageBackend"]),
    ("data.transformer", "api", false, &[]),
    ("processing.step", "api", false, &["componentId", "successTransition", "compensateTransition", "maxRetries", "retryBackoffMs", "timeoutSeconds"]),
    ("secrets.vault", "secrets", false, &["mode", "address", "token", "mountPath", "namespace"]),
    ("secrets.aws", "secrets", false, &["region", "accessKeyId", "secretAccessKey"]),
    ("dynamic.component", "ai", false, &["componentId", "source", "provides", "requires"]),
    ("featureflag.service", "featureflags", true, &["provider", "cache_ttl", "sse_enabled", "db_path"]),
    ("eventstore.service", "eventstore", true, &["db_path", "retention_days"]),
    ("dlq.service", "dlq", true, &["max_retries", "retention_days"]),
    ("timeline.service", "timeline", false, &["event_store"]),
    ("scheduler.modular", "modularcompat", false, &[]),
    ("cache.modular", "modularcompat", false, &[]),
    ("nosql.memory", "datastores", true, &["collection"]),
    ("nosql.dynamodb", "datastores", false, &["tableName", "region", "endpoint", "credentials"]),
    ("nosql.mongodb", "datastores", false, &["uri", "database", "collection"]),
    ("nosql.redis", "datastores", false, &["addr", "password", "db"]),
    ("storage.artifact", "storage", false, &["backend", "basePath", "maxSize", "bucket", "region", "endpoint"]),
    ("cloud.account", "cloud", false, &["provider", "region", "credentials", "project_id", "subscription_id"]),
    ("gitlab.client", "gitlab", false, &["url", "token"]),
    ("gitlab.webhook", "gitlab", false, &["secret", "path", "events"]),
    ("aws.codebuild", "cicd", true, &["account", "region", "service_role", "compute_type", "image", "source_type"]),
    ("policy.mock", "policy", false, &["policies"]),
    ("tracing.propagation", "observability", false, &["format"]),
    ("platform.region_router", "platform", false, &["module", "mode"]),
    ("platform.doks", "platform", false, &["account", "cluster_name", "region", "version", "node_pool"]),
    ("platform.do_networking", "platform", false, &["account", "provider", "vpc", "firewalls"]),
    ("platform.do_dns", "platform", false, &["account", "provider", "domain", "records"]),
    ("platform.do_app", "platform", false, &["account", "provider", "name", "region", "image", "instances", "http_port", "envs"]),
];

pub(crate) const STEP_TYPES: &[StepEntry] = &[
    ("step.validate", "pipelinesteps", &["rules", "required", "schema"]),
    ("step.transform", "pipelinesteps", &["mapping", "template"]),
    ("step.conditional", "pipelinesteps", &["condition", "then", "else"]),
    ("step.set", "pipelinesteps", &["key", "value"]),
    ("step.log", "pipelinesteps", &["message", "level"]),
    ("step.delegate", "pipelinesteps", &["service", "action"]),
    ("step.jq", "pipelinesteps", &["expression", "input", "output"]),
    ("step.publish", "pipelinesteps", &["topic", "broker", "payload"]),
    ("step.event_publish", "pipelinesteps", &["topic", "broker", "payload", "headers", "event_type"]),
    ("step.http_call", "pipelinesteps", &["url", "method", "headers", "body", "timeout"]),
    ("step.request_parse", "pipelinesteps", &["body", "query", "headers"]),
    ("step.db_query", "pipelinesteps", &["database", "query", "params"]),
    ("step.db_exec", "pipelinesteps", &["database", "query", "params"]),
    ("step.json_response", "pipelinesteps", &["status", "body", "headers"]),
    ("step.workflow_call", "pipelinesteps", &["workflow", "input"]),
    ("step.validate_path_param", "pipelinesteps", &["param", "type", "required"]),
    ("step.validate_pagination", "pipelinesteps", &["maxLimit", "defaultLimit"]),
    ("step.validate_request_body", "pipelinesteps", &["schema", "required"]),
    ("step.foreach", "pipelinesteps", &["collection", "steps"]),
    ("step.webhook_verify", "pipelinesteps", &["secret", "header", "algorithm"]),
    ("step.cache_get", "pipelinesteps", &["cache", "key", "output"]),
    ("step.cache_set", "pipelinesteps", &["cache", "key", "value", "ttl"]),
    ("step.cache_delete", "pipelinesteps", &["cache", "key"]),
    ("step.dlq_send", "pipelinesteps", &["topic", "original_topic", "error", "payload", "broker"]),
    ("step.dlq_replay", "pipelinesteps", &["dlq_topic", "target_topic", "max_messages", "broker"]),
    ("step.retry_with_backoff", "pipelinesteps", &["max_retries", "initial_delay", "max_delay", "multiplier", "step"]),
    ("step.resilient_circuit_breaker", "pipelinesteps", &["failure_threshold", "reset_timeout", "step", "fallback"]),
    ("step.rate_limit", "http", &["requestsPerMinute", "burstSize", "key"]),
    ("step.circuit_breaker", "http", &["threshold", "timeout", "halfOpenRequests"]),
    ("step.statemachine_transition", "statemachine", &["engine", "instanceId", "transition"]),
    ("step.statemachine_get", "statemachine", &["engine", "instanceId"]),
    ("step.ai_complete", "ai", &["model", "prompt", "maxTokens", "temperature"]),
    ("step.ai_classify", "ai", &["model", "input", "categories"]),
    ("step.ai_extract", "ai", &["model", "input", "schema"]),
    ("step.sub_workflow", "ai", &["workflow", "input"]),
    ("step.feature_flag", "featureflags", &["flag", "default", "output"]),
    ("step.ff_gate", "featureflags", &["flag", "condition"]),
    ("step.shell_exec", "cicd", &["command", "args", "env", "workdir", "timeout"]),
    ("step.artifact_pull", "cicd", &["registry", "artifact", "tag", "output"]),
    ("step.artifact_push", "cicd", &["registry", "artifact", "tag"]),
    ("step.docker_build", "cicd", &["context", "dockerfile", "tags", "buildArgs"]),
    ("step.docker_push", "cicd", &["image", "registry", "credentials"]),
    ("step.docker_run", "cicd", &["image", "command", "env", "volumes"]),
    ("step.scan_sast", "cicd", &["tool", "path", "severity"]),
    ("step.scan_container", "cicd", &["image", "severity"]),
    ("step.scan_deps", "cicd", &["path", "severity"]),
    ("step.deploy", "cicd", &["target", "config", "namespace"]),
    ("step.gate", "cicd", &["condition", "approvers"]),
    ("step.build_ui", "cicd", &["path", "command"]),
    ("step.build_from_config", "cicd", &["config", "output"]),
    ("step.auth_required", "pipelinesteps", &["roles", "scopes"]),
    ("step.user_register", "pipelinesteps", &["store", "fields"]),
    ("step.user_login", "pipelinesteps", &["store", "auth"]),
    ("step.user_profile", "pipelinesteps", &["store"]),
    ("step.org_create", "pipelinesteps", &["store"]),
    ("step.org_list", "pipelinesteps", &["store"]),
    ("step.nosql_get", "datastores", &["store", "key", "output", "miss_ok"]),
    ("step.nosql_put", "datastores", &["store", "key", "item"]),
    ("step.nosql_delete", "datastores", &["store", "key"]),
    ("step.nosql_query", "datastores", &["store", "prefix", "output"]),
    ("step.artifact_upload", "storage", &["store", "key", "source", "metadata"]),
    ("step.artifact_download", "storage", &["store", "key", "dest"]),
    ("step.artifact_list", "storage", &["store", "prefix", "output"]),
    ("step.artifact_delete", "storage", &["store", "key"]),
    ("step.cloud_validate", "cloud", &["account"]),
    ("step.build_binary", "cicd", &["config_file", "output", "os", "arch"]),
    ("step.codebuild_create_project", "cicd", &["project"]),
    ("step.codebuild_start", "cicd", &["project", "env_vars"]),
    ("step.codebuild_status", "cicd", &["project", "build_id"]),
    ("step.codebuild_logs", "cicd", &["project", "build_id"]),
    ("step.codebuild_list_builds", "cicd", &["project"]),
    ("step.codebuild_delete_project", "cicd", &["project"]),
    ("step.gitlab_trigger_pipeline", "gitlab", &["client", "project", "ref", "variables"]),
    ("step.gitlab_pipeline_status", "gitlab", &["client", "project", "pipeline_id"]),
    ("step.gitlab_parse_webhook", "gitlab", &["client"]),
    ("step.gitlab_create_mr", "gitlab", &["client", "project", "source_branch", "target_branch", "title", "description"]),
    ("step.gitlab_mr_comment", "gitlab", &["client", "project", "mr_iid", "body"]),
    ("step.policy_load", "policy", &["engine", "policy_name", "content"]),
    ("step.policy_evaluate", "policy", &["engine", "input_from"]),
    ("step.policy_list", "policy", &["engine"]),
    ("step.policy_test", "policy", &["engine", "sample_input", "expect_allow"]),
    ("step.trace_start", "observability", &["span_name", "attributes"]),
    ("step.trace_inject", "observability", &["carrier_field", "carrier_type"]),
    ("step.trace_extract", "observability", &["carrier_field", "carrier_type"]),
    ("step.trace_annotate", "observability", &["event_name", "attributes"]),
    ("step.trace_link", "observability", &["parent_field"]),
    ("step.marketplace_search", "marketplace", &["query", "category", "tags"]),
    ("step.marketplace_detail", "marketplace", &["plugin"]),
    ("step.marketplace_install", "marketplace", &["plugin"]),
    ("step.marketplace_installed", "marketplace", &[]),
    ("step.marketplace_update", "marketplace", &["plugin"]),
    ("step.marketplace_uninstall", "marketplace", &["plugin"]),
    ("step.region_deploy", "platform", &["module", "region"]),
    ("step.region_promote", "platform", &["module", "region"]),
    ("step.region_failover", "platform", &["module", "from", "to"]),
    ("step.region_status", "platform", &["module"]),
    ("step.region_weight", "platform", &["module", "region", "weight"]),
    ("step.region_sync", "platform", &["module"]),
    ("step.argo_submit", "platform", &["service", "workflow_name", "steps"]),
    ("step.argo_status", "platform", &["service", "workflow_run"]),
    ("step.argo_logs", "platform", &["service", "workflow_run"]),
    ("step.argo_delete", "platform", &["service", "workflow_run"]),
    ("step.argo_list", "platform", &["service", "label_selector"]),
    ("step.do_deploy", "platform", &["app", "image"]),
    ("step.do_status", "platform", &["app"]),
    ("step.do_logs", "platform", &["app"]),
    ("step.do_scale", "platform", &["app", "instances"]),
    ("step.do_destroy", "platform", &["app"]),
];
