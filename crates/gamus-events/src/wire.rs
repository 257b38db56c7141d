// Espejo del esquema protobuf del productor:
//
//   enum EventType {
//     EVENT_UNSPECIFIED = 0;
//     EVENT_ARTIST_CREATED = 1;
//     EVENT_ARTIST_DELETED = 2;
//   }
//
//   message Event {
//     EventType event_type = 1;
//     oneof body {
//       ArtistCreated artist_created = 2;
//       ArtistDeleted artist_deleted = 3;
//     }
//   }
//
//   message ArtistCreated { string id = 1; string name = 2; }
//   message ArtistDeleted { string id = 1; }

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum EventType {
  Unspecified = 0,
  ArtistCreated = 1,
  ArtistDeleted = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EventEnvelope {
  #[prost(enumeration = "EventType", tag = "1")]
  pub event_type: i32,
  #[prost(oneof = "event_envelope::Body", tags = "2, 3")]
  pub body: ::core::option::Option<event_envelope::Body>,
}

pub mod event_envelope {
  #[derive(Clone, PartialEq, ::prost::Oneof)]
  pub enum Body {
    #[prost(message, tag = "2")]
    ArtistCreated(super::ArtistCreatedBody),
    #[prost(message, tag = "3")]
    ArtistDeleted(super::ArtistDeletedBody),
  }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArtistCreatedBody {
  #[prost(string, tag = "1")]
  pub id: ::prost::alloc::string::String,
  #[prost(string, tag = "2")]
  pub name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArtistDeletedBody {
  #[prost(string, tag = "1")]
  pub id: ::prost::alloc::string::String,
}
