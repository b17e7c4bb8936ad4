//! Command instance resolution.

use std::collections::HashMap;
use std::fmt;

use crate::command::{Command, ErasedCommand, TypeKey};

/// Supplies command instances to the dispatcher and takes them back.
///
/// [`release`](Self::release) is called exactly once for every instance
/// returned by [`resolve`](Self::resolve), whether the dispatch succeeded,
/// failed or panicked.
pub trait InstanceResolver {
    fn resolve(&self, command: &TypeKey) -> Option<Box<dyn ErasedCommand>>;

    fn release(&self, instance: Box<dyn ErasedCommand>) {
        drop(instance);
    }
}

type Factory = Box<dyn Fn() -> Box<dyn ErasedCommand>>;

/// Builds a fresh instance per dispatch from registered factories.
///
/// # Examples
///
/// ```
/// use command_dispatch_engine::{Command, FactoryResolver, InstanceResolver, TypeKey};
///
/// #[derive(Default)]
/// struct PingCommand;
///
/// impl Command for PingCommand {
///     type Arguments = ();
///
///     fn execute(&mut self, _: ()) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
///
/// let resolver = FactoryResolver::new().with_default::<PingCommand>();
/// assert!(resolver.resolve(&TypeKey::of::<PingCommand>()).is_some());
/// assert!(resolver.resolve(&TypeKey::of::<String>()).is_none());
/// ```
#[derive(Default)]
pub struct FactoryResolver {
    factories: HashMap<TypeKey, Factory>,
}

impl FactoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for `C`, replacing any earlier factory.
    pub fn register<C: Command>(&mut self, factory: impl Fn() -> C + 'static) -> &mut Self {
        self.factories.insert(
            TypeKey::of::<C>(),
            Box::new(move || Box::new(factory()) as Box<dyn ErasedCommand>),
        );
        self
    }

    pub fn with<C: Command>(mut self, factory: impl Fn() -> C + 'static) -> Self {
        self.register(factory);
        self
    }

    pub fn with_default<C: Command + Default>(self) -> Self {
        self.with(C::default)
    }

    pub fn contains(&self, command: &TypeKey) -> bool {
        self.factories.contains_key(command)
    }
}

impl InstanceResolver for FactoryResolver {
    fn resolve(&self, command: &TypeKey) -> Option<Box<dyn ErasedCommand>> {
        self.factories.get(command).map(|factory| factory())
    }
}

impl fmt::Debug for FactoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<_> = self.factories.keys().map(TypeKey::name).collect();
        commands.sort_unstable();
        f.debug_struct("FactoryResolver")
            .field("commands", &commands)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct TickCommand {
        ticks: Rc<Cell<u32>>,
    }

    impl Command for TickCommand {
        type Arguments = ();

        fn execute(&mut self, _: ()) -> anyhow::Result<()> {
            self.ticks.set(self.ticks.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_factory_builds_fresh_instances() {
        let built = Rc::new(Cell::new(0));
        let ticks = Rc::new(Cell::new(0));
        let resolver = {
            let built = built.clone();
            let ticks = ticks.clone();
            FactoryResolver::new().with(move || {
                built.set(built.get() + 1);
                TickCommand {
                    ticks: ticks.clone(),
                }
            })
        };

        let key = TypeKey::of::<TickCommand>();
        assert!(resolver.contains(&key));
        let first = resolver.resolve(&key).unwrap();
        let second = resolver.resolve(&key).unwrap();
        assert_eq!(built.get(), 2);
        assert_eq!(first.command_type(), key);
        resolver.release(first);
        resolver.release(second);
    }

    #[test]
    fn test_unknown_type_resolves_to_none() {
        let resolver = FactoryResolver::new();
        assert!(resolver.resolve(&TypeKey::of::<TickCommand>()).is_none());
        assert_eq!(format!("{resolver:?}"), "FactoryResolver { commands: [] }");
    }
}
