use crate::model::{LayoutMethod, Location, Member};

/// A structured record whose fixed byte layout is validated.
///
/// The entity exclusively owns its members. Members are stored in declaration order; the
/// validators process them by ascending [`Member::sequence`], which is not required to match
/// storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Namespace the entity was declared in
    pub namespace: String,
    /// Entity name
    pub name: String,
    /// A layout declaration was present on the entity
    pub has_layout: bool,
    /// Declared layout method
    pub layout_method: LayoutMethod,
    /// Declared size of the backing buffer in bytes (explicit layout only)
    pub block_length: i32,
    /// Members in declaration order
    pub members: Vec<Member>,
    /// Where the entity was declared
    pub location: Location,
    /// Identifier assigned by the discovery collaborator, checked for uniqueness across entities
    pub entity_id: Option<String>,
}

impl Entity {
    /// Creates an entity without a layout declaration or members.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            has_layout: false,
            layout_method: LayoutMethod::Undefined,
            block_length: 0,
            members: Vec::new(),
            location: Location::none(),
            entity_id: None,
        }
    }

    /// Declares a linear layout; offsets and block length are computed.
    #[must_use]
    pub fn linear(mut self) -> Self {
        self.has_layout = true;
        self.layout_method = LayoutMethod::Linear;
        self
    }

    /// Declares an explicit layout over a block of `block_length` bytes.
    #[must_use]
    pub fn explicit(mut self, block_length: i32) -> Self {
        self.has_layout = true;
        self.layout_method = LayoutMethod::Explicit;
        self.block_length = block_length;
        self
    }

    /// Declares a layout with an arbitrary method and block length.
    #[must_use]
    pub fn with_layout(mut self, layout_method: LayoutMethod, block_length: i32) -> Self {
        self.has_layout = true;
        self.layout_method = layout_method;
        self.block_length = block_length;
        self
    }

    /// Appends a member.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Sets the source location.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets the identifier used by the duplicate id check.
    #[must_use]
    pub fn with_entity_id(mut self, entity_id: impl Into<String>) -> Self {
        self.entity_id = Some(entity_id.into());
        self
    }

    /// `namespace.name`, or just `name` for the root namespace.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    /// Looks up a member by name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<MemberView<'_>> {
        self.members
            .iter()
            .find(|member| member.name == name)
            .map(|member| MemberView { entity: self, member })
    }

    /// Members sorted by ascending sequence; ties keep declaration order.
    #[must_use]
    pub fn members_by_sequence(&self) -> Vec<MemberView<'_>> {
        let mut views: Vec<MemberView<'_>> = self
            .members
            .iter()
            .map(|member| MemberView { entity: self, member })
            .collect();
        views.sort_by_key(|view| view.member.sequence);
        views
    }
}

/// A member together with a borrowed reference to the entity that owns it.
#[derive(Debug, Clone, Copy)]
pub struct MemberView<'a> {
    /// Owning entity
    pub entity: &'a Entity,
    /// The member itself
    pub member: &'a Member,
}

impl MemberView<'_> {
    /// Layout method of the owning entity.
    #[must_use]
    pub fn layout_method(&self) -> LayoutMethod {
        if self.entity.has_layout {
            self.entity.layout_method
        } else {
            LayoutMethod::Undefined
        }
    }
}

impl std::ops::Deref for MemberView<'_> {
    type Target = Member;

    fn deref(&self) -> &Self::Target {
        self.member
    }
}
