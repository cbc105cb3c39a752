//! Capability traits describing an authenticated subject.
//!
//! The analyzer only ever sees a subject through these traits:
//! - [`Role`] exposes a name
//! - [`Permission`] exposes a value
//! - [`Subject`] exposes an identifier plus optional role and permission lists
//!
//! Lists are `Option<&[Option<T>]>`: the outer `None` means the identity layer
//! supplied no list at all, an inner `None` is an absent entry. Both are
//! treated as "nothing to match" by every check.
//!
//! [`Principal`] is a ready-made implementation for callers that do not have
//! their own identity model.

mod types;

pub use types::{NamedRole, PermissionValue, Principal};

/// A role held by a subject, identified by its name.
pub trait Role {
    fn name(&self) -> &str;
}

/// A permission held by a subject, identified by its value.
///
/// Values are usually dot-delimited tokens such as `"printers.edit"`.
pub trait Permission {
    fn value(&self) -> &str;
}

/// An authenticated principal whose roles and permissions are checked.
///
/// # Example Implementation
///
/// ```
/// use authz_analyzer::{Role, Subject};
///
/// struct Admin(String);
///
/// impl Role for Admin {
///     fn name(&self) -> &str {
///         &self.0
///     }
/// }
///
/// struct ServiceAccount {
///     roles: Vec<Option<Admin>>,
/// }
///
/// impl Subject for ServiceAccount {
///     type Role = Admin;
///     type Permission = String;
///
///     fn identifier(&self) -> &str {
///         "service:backup"
///     }
///
///     fn roles(&self) -> Option<&[Option<Admin>]> {
///         Some(&self.roles)
///     }
///
///     fn permissions(&self) -> Option<&[Option<String>]> {
///         None
///     }
/// }
/// ```
pub trait Subject {
    type Role: Role;
    type Permission: Permission;

    /// Identifier of the subject. Never consulted by the analyzer.
    fn identifier(&self) -> &str;

    /// Roles in the order the identity layer supplied them.
    fn roles(&self) -> Option<&[Option<Self::Role>]>;

    /// Permissions in the order the identity layer supplied them.
    fn permissions(&self) -> Option<&[Option<Self::Permission>]>;
}

impl Role for String {
    fn name(&self) -> &str {
        self
    }
}

impl Permission for String {
    fn value(&self) -> &str {
        self
    }
}

impl<T: Role + ?Sized> Role for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Role + ?Sized> Role for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: Permission + ?Sized> Permission for &T {
    fn value(&self) -> &str {
        (**self).value()
    }
}

impl<T: Permission + ?Sized> Permission for Box<T> {
    fn value(&self) -> &str {
        (**self).value()
    }
}

impl<S: Subject + ?Sized> Subject for &S {
    type Role = S::Role;
    type Permission = S::Permission;

    fn identifier(&self) -> &str {
        (**self).identifier()
    }

    fn roles(&self) -> Option<&[Option<Self::Role>]> {
        (**self).roles()
    }

    fn permissions(&self) -> Option<&[Option<Self::Permission>]> {
        (**self).permissions()
    }
}
