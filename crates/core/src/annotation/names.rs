//! Well-known annotation and type names recognised by the planner

pub const AROUND: &str = "beanforge.aop.Around";
pub const INTRODUCTION: &str = "beanforge.aop.Introduction";
pub const INTERCEPTOR_BINDING: &str = "beanforge.aop.InterceptorBinding";
pub const INTERCEPTOR_BINDING_DEFINITIONS: &str = "beanforge.aop.InterceptorBindingDefinitions";
pub const ADAPTER: &str = "beanforge.aop.Adapter";
/// Interceptor implementations are never proxied themselves
pub const INTERCEPTOR_TYPE: &str = "beanforge.aop.Interceptor";

pub const BEAN: &str = "beanforge.context.Bean";
pub const FACTORY: &str = "beanforge.context.Factory";
pub const DEFAULT_SCOPE: &str = "beanforge.context.DefaultScope";
pub const EXECUTABLE: &str = "beanforge.context.Executable";
pub const VALUE: &str = "beanforge.context.Value";
pub const PROPERTY: &str = "beanforge.context.Property";
pub const CONFIGURATION_READER: &str = "beanforge.context.ConfigurationReader";

pub const SCOPE: &str = "jakarta.inject.Scope";
pub const INJECT: &str = "jakarta.inject.Inject";
pub const QUALIFIER: &str = "jakarta.inject.Qualifier";
pub const NAMED: &str = "jakarta.inject.Named";
pub const SINGLETON: &str = "jakarta.inject.Singleton";

/// Root of the reference type hierarchy, also the erasure of an unbounded type variable
pub const OBJECT: &str = "java.lang.Object";

pub const MEMBER_VALUE: &str = "value";
pub const MEMBER_KIND: &str = "kind";
pub const MEMBER_INTERFACES: &str = "interfaces";
pub const MEMBER_PROXY_TARGET: &str = "proxyTarget";

/// Members written onto a SAM method when it is linked to an adapted bean method
pub mod adapter {
    pub const ADAPTED_BEAN: &str = "adaptedBean";
    pub const ADAPTED_METHOD: &str = "adaptedMethod";
    pub const ADAPTED_ARGUMENT_TYPES: &str = "adaptedArgumentTypes";
    pub const ADAPTED_QUALIFIER: &str = "adaptedQualifier";
}
