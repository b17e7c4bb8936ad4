//! Path-to-command routes.

use command_dispatch_core::Path;
use serde::Serialize;
use tracing::debug;

use crate::error::RegistrationError;
use crate::metadata::CommandMetaData;

/// A command path bound to command metadata.
///
/// Equal when both the path (case-insensitively) and the command type are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Route {
    pub path: Path,
    pub command: CommandMetaData,
}

impl Route {
    pub fn new(path: Path, command: CommandMetaData) -> Self {
        Self { path, command }
    }
}

/// Routes in registration order.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `route`, replacing an equal route already present.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::RouteConflict`] when the path already leads to
    /// another command type.
    pub fn add(&mut self, route: Route) -> Result<(), RegistrationError> {
        self.check(&route)?;
        self.routes.retain(|existing| existing != &route);
        debug!(path = %route.path, command = %route.command.name, "Added route");
        self.routes.push(route);
        Ok(())
    }

    /// Checks that `route` can be added without changing the table.
    pub fn check(&self, route: &Route) -> Result<(), RegistrationError> {
        match self
            .routes
            .iter()
            .find(|existing| existing.path == route.path && existing.command != route.command)
        {
            Some(existing) => Err(RegistrationError::RouteConflict {
                path: route.path.clone(),
                existing: existing.command.command_type.name(),
                attempted: route.command.command_type.name(),
            }),
            None => Ok(()),
        }
    }

    pub fn find(&self, path: &Path) -> Option<&Route> {
        self.routes.iter().find(|route| &route.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    struct PushCommand;

    impl Command for PushCommand {
        type Arguments = ();
        const DESCRIPTION: Option<&'static str> = Some("Push changes");

        fn execute(&mut self, _: ()) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct PullCommand;

    impl Command for PullCommand {
        type Arguments = ();

        fn execute(&mut self, _: ()) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn route<C: Command>(path: &str) -> Route {
        Route::new(
            Path::parse(path).unwrap(),
            CommandMetaData::of::<C>().unwrap(),
        )
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let mut table = RouteTable::new();
        table.add(route::<PushCommand>("push")).unwrap();

        let found = table.find(&Path::parse("PUSH").unwrap()).unwrap();
        assert_eq!(found.command.name, "push");
        assert!(table.find(&Path::parse("push tags").unwrap()).is_none());
    }

    #[test]
    fn test_re_adding_replaces_equal_route() {
        let mut table = RouteTable::new();
        table.add(route::<PushCommand>("push")).unwrap();

        let mut updated = route::<PushCommand>("Push");
        updated.command.description = Some("Push, again".into());
        table.add(updated).unwrap();

        assert_eq!(table.len(), 1);
        let found = table.find(&Path::parse("push").unwrap()).unwrap();
        assert_eq!(found.command.description.as_deref(), Some("Push, again"));
        assert_eq!(found.path.to_string(), "/Push");
    }

    #[test]
    fn test_same_command_on_several_paths() {
        let mut table = RouteTable::new();
        table.add(route::<PushCommand>("push")).unwrap();
        table.add(route::<PushCommand>("remote push")).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_conflicting_route() {
        let mut table = RouteTable::new();
        table.add(route::<PushCommand>("sync")).unwrap();
        let err = table.add(route::<PullCommand>("sync")).unwrap_err();
        assert!(matches!(err, RegistrationError::RouteConflict { .. }));
        assert_eq!(table.len(), 1);
    }
}
