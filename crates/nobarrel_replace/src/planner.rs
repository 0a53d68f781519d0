use log::{debug, trace};
use nobarrel_core::{
    Binding, BindingKind, Module, ModuleCache, Resolver, Tracer, is_barrel, is_index_candidate,
};

use crate::{
    paths::compute_import_path,
    types::{Addition, PartialPolicy, RewritePlan},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    pub partial: PartialPolicy,
    pub prefer_alias: bool,
    pub index_only: bool,
}

/// Builds a [`RewritePlan`] per consuming module. Reads modules through the
/// cache but never writes to disk.
pub struct Planner<'a> {
    resolver: &'a Resolver,
    tracer: Tracer<'a>,
    options: PlanOptions,
}

impl<'a> Planner<'a> {
    pub fn new(resolver: &'a Resolver, max_hops: usize, options: PlanOptions) -> Self {
        Self { resolver, tracer: Tracer::new(resolver, max_hops), options }
    }

    pub fn plan(&self, cache: &mut ModuleCache, module: &Module) -> RewritePlan {
        let mut plan = RewritePlan::default();
        let aliases = (self.options.prefer_alias && !self.resolver.aliases().is_empty())
            .then(|| self.resolver.aliases());

        for (index, decl) in module.imports.iter().enumerate() {
            if decl.bindings.is_empty() || decl.has_attributes {
                continue;
            }
            let Some(target) = self.resolver.resolve(module.path(), &decl.module_specifier) else {
                continue;
            };
            if self.options.index_only && !is_index_candidate(&target) {
                continue;
            }
            let barrel = match cache.load(&target) {
                Ok(barrel) => barrel,
                Err(e) => {
                    debug!("Not rewriting '{}': {}", decl.module_specifier, e);
                    continue;
                }
            };
            if !is_barrel(&barrel) {
                continue;
            }
            trace!(
                "Import '{}' in {} targets barrel {}",
                decl.module_specifier,
                module.path().display(),
                target.display()
            );

            let mut relocated: Vec<(String, Binding)> = Vec::new();
            let mut kept: Vec<Binding> = Vec::new();
            for binding in &decl.bindings {
                if binding.kind == BindingKind::Namespace {
                    kept.push(binding.clone());
                    continue;
                }
                let direct = self
                    .tracer
                    .trace(cache, &target, &binding.imported_name)
                    .filter(|symbol| symbol.declaring_module.as_path() != module.path())
                    .and_then(|symbol| {
                        let specifier =
                            compute_import_path(module.path(), &symbol.declaring_module, aliases)?;
                        Some((specifier, symbol.declared_name))
                    });
                match direct {
                    Some((specifier, declared_name)) => {
                        let kind = if declared_name == "default" {
                            BindingKind::Default
                        } else {
                            BindingKind::Named
                        };
                        relocated.push((
                            specifier,
                            Binding {
                                kind,
                                imported_name: declared_name,
                                local_name: binding.local_name.clone(),
                                type_only: binding.type_only,
                            },
                        ));
                    }
                    None => kept.push(binding.clone()),
                }
            }

            if relocated.is_empty() {
                continue;
            }
            if !kept.is_empty() {
                if self.options.partial == PartialPolicy::Keep {
                    debug!(
                        "Keeping '{}' in {}: {} bindings can not be relocated",
                        decl.module_specifier,
                        module.path().display(),
                        kept.len()
                    );
                    continue;
                }
                plan.retained.push((index, kept));
            } else {
                plan.removals.push(index);
            }

            for (specifier, binding) in relocated {
                add_binding(&mut plan.additions, index, specifier, decl.type_only, binding);
            }
        }

        debug!(
            "Planned {} new imports for {} ({} removed, {} split)",
            plan.additions.len(),
            module.path().display(),
            plan.removals.len(),
            plan.retained.len()
        );
        plan
    }
}

/// Groups by `(specifier, type_only)`, keeping the first anchor and the
/// original binding order.
fn add_binding(
    additions: &mut Vec<Addition>,
    anchor: usize,
    specifier: String,
    type_only: bool,
    binding: Binding,
) {
    match additions.iter_mut().find(|a| a.specifier == specifier && a.type_only == type_only) {
        Some(addition) => {
            if !addition.bindings.iter().any(|b| b.local_name == binding.local_name) {
                addition.bindings.push(binding);
            }
        }
        None => additions.push(Addition { anchor, specifier, type_only, bindings: vec![binding] }),
    }
}
