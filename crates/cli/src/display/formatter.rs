use beanforge_core::{BeanDefinitionPlan, BeanStrategy, PlanArtifact, PlanKind};

pub fn describe_kind(kind: &PlanKind) -> String {
    match kind {
        PlanKind::Bean => "bean".to_string(),
        PlanKind::FactoryMethod { method } => format!("factory method {method}()"),
        PlanKind::AroundProxy { target, .. } => format!("around proxy of {target}"),
        PlanKind::IntroductionProxy { interface } => format!("introduction of {interface}"),
        PlanKind::AdaptedMethod {
            source_method,
            interface,
        } => format!("{source_method}() adapted to {interface}"),
    }
}

pub fn describe_artifact(artifact: &PlanArtifact) -> String {
    match artifact {
        PlanArtifact::DefaultConstructor => "default constructor".to_string(),
        PlanArtifact::TypeArguments { interface, arguments } => {
            let bound = arguments
                .iter()
                .map(|(variable, type_ref)| format!("{variable} -> {type_ref}"))
                .collect::<Vec<_>>();
            format!("type arguments of {interface}: {}", bound.join(", "))
        }
        PlanArtifact::InterceptorBinding { bindings } => {
            let types = bindings
                .iter()
                .map(|b| format!("{}({})", b.kind, b.binding_type().unwrap_or("?")))
                .collect::<Vec<_>>();
            format!("interceptor bindings: {}", types.join(", "))
        }
        PlanArtifact::AroundMethod { declaring_type, method, .. } => {
            format!("around {declaring_type}#{}", method.signature())
        }
        PlanArtifact::IntroductionMethod { declaring_type, method, .. } => {
            format!("introduction {declaring_type}#{}", method.signature())
        }
        PlanArtifact::OriginatingElement { type_name } => format!("originating element {type_name}"),
        PlanArtifact::InjectionPoint { member, kind } => format!("injection point {member} ({kind:?})"),
        PlanArtifact::ConfigurationProperty { field } => format!("configuration property {}", field.name),
    }
}

pub fn print_strategy(class_name: &str, strategy: &BeanStrategy) {
    println!("  {class_name:<50} {strategy}");
}

pub fn print_plan(plan: &BeanDefinitionPlan) {
    println!("\n📦 {} [{}]", plan.qualified_name(), describe_kind(&plan.kind));
    if !plan.interfaces.is_empty() {
        println!("   implements {}", plan.interfaces.join(", "));
    }
    for artifact in plan.artifacts() {
        println!("   - {}", describe_artifact(artifact));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanforge_core::{BeanDefinitionVisitor, MethodElement, TypeRef};
    use std::collections::BTreeMap;

    #[test]
    fn test_describe_artifacts() {
        let mut plan = BeanDefinitionPlan::new("com.acme", "Greeter$Fn$run1", PlanKind::Bean, "com.acme.Greeter");
        plan.visit_type_arguments(
            "com.acme.Fn",
            BTreeMap::from([("T".to_string(), TypeRef::concrete("java.lang.String"))]),
        );
        plan.visit_around_method(
            "com.acme.Fn",
            &MethodElement::new("com.acme.Fn", "apply"),
            &beanforge_core::AnnotationMetadata::default().into(),
        );

        let lines: Vec<_> = plan.artifacts().iter().map(describe_artifact).collect();
        assert_eq!(lines[0], "type arguments of com.acme.Fn: T -> java.lang.String");
        assert_eq!(lines[1], "around com.acme.Fn#apply()");
    }
}
