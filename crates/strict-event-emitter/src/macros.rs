/// Declare an event map and its events.
///
/// ```
/// strict_event_emitter::event_map! {
///     pub struct ChatEvents {
///         Joined = "joined" => (String,),
///         Message = "message" => (String, String),
///     }
/// }
/// ```
///
/// expands to a `ChatEvents` marker implementing [`EventMap`](crate::EventMap)
/// and one zero-sized type per event implementing
/// [`Event<ChatEvents>`](crate::Event) with the given name and argument tuple.
#[macro_export]
macro_rules! event_map {
    (
        $(#[$meta:meta])*
        $vis:vis struct $map:ident {
            $(
                $(#[$event_meta:meta])*
                $event:ident = $name:literal => $args:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $map;

        impl $crate::EventMap for $map {}

        $(
            $(#[$event_meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            $vis struct $event;

            impl $crate::Event<$map> for $event {
                const NAME: $crate::EventName = $name;
                type Args = $args;
            }
        )*
    };
}
