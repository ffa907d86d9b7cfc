/// Declares an event map and one marker type per event.
///
/// Each entry is `Type("name"): Args`. `Args` is the handler parameter list:
/// a single type, a tuple, or `()`.
///
/// ```rust
/// use typed_emitter::{event_map, Event, EventMap};
///
/// event_map! {
///     /// Events of a file watcher.
///     pub WatchEvents {
///         Changed("changed"): String,
///         Renamed("renamed"): (String, String),
///         Closed("closed"): (),
///     }
/// }
///
/// assert_eq!(Renamed::NAME, "renamed");
/// assert_eq!(WatchEvents::NAMES, &["changed", "renamed", "closed"]);
/// ```
///
/// Names must be unique within a map; a duplicate fails to compile:
///
/// ```compile_fail
/// use typed_emitter::event_map;
///
/// event_map! {
///     Dup {
///         First("x"): u32,
///         Second("x"): String,
///     }
/// }
/// ```
#[macro_export]
macro_rules! event_map {
    (
        $(#[$map_meta:meta])*
        $vis:vis $map:ident {
            $(
                $(#[$ev_meta:meta])*
                $event:ident($name:literal): $args:ty
            ),* $(,)?
        }
    ) => {
        $(#[$map_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        $vis struct $map;

        impl $crate::EventMap for $map {
            const NAMES: &'static [&'static str] = &[$($name),*];
        }

        const _: () = ::core::assert!(
            $crate::__private::names_unique(<$map as $crate::EventMap>::NAMES),
            ::core::concat!("event map `", ::core::stringify!($map), "` declares an event name twice")
        );

        $(
            $(#[$ev_meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
            $vis struct $event;

            impl $crate::Event for $event {
                type Map = $map;
                type Args = $args;
                const NAME: &'static str = $name;
            }
        )*
    };
}
