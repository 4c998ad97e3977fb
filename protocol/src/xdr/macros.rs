//! Declarative macros that generate XDR (and Txrep) implementations.
//!
//! Every XDR definition becomes exactly one macro invocation, so field order,
//! discriminant values and arm names are written down once and shared by the
//! binary codec and the text representation.
//!
//! - `xdr_opaque!` — fixed-size opaque newtypes (hashes, keys, hints).
//! - `xdr_enum!`   — C-like enums with explicit values and XDR token names.
//! - `xdr_struct!` — structs encoded field by field, in declaration order.
//! - `xdr_union!`  — discriminated unions; void arms and payload arms.
//! - `xdr_result!` — result unions where only some codes carry a payload and
//!   every other code of the result enum is void.
//!
//! Struct and union invocations prefixed with `@codec` only get the binary
//! codec (used for ledger entries and results, which never appear in a
//! transaction's text form).

macro_rules! xdr_opaque {
    (
        $(#[$meta:meta])*
        pub struct $name:ident([u8; $len:literal]);
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            pub const LEN: usize = $len;

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            pub fn from_hex(s: &str) -> Result<Self, $crate::xdr::XdrError> {
                let bytes = hex::decode(s)
                    .map_err(|e| $crate::xdr::XdrError::InvalidValue(format!("hex: {e}")))?;
                let array: [u8; $len] = bytes.as_slice().try_into().map_err(|_| {
                    $crate::xdr::XdrError::InvalidValue(format!(
                        "{} needs {} bytes, got {}",
                        stringify!($name),
                        $len,
                        bytes.len()
                    ))
                })?;
                Ok(Self(array))
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl From<$name> for [u8; $len] {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_hex())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.to_hex())
            }
        }

        impl $crate::xdr::XdrCodec for $name {
            fn encode(&self, w: &mut $crate::xdr::XdrWriter) -> Result<(), $crate::xdr::XdrError> {
                w.write_fixed_opaque(&self.0);
                Ok(())
            }

            fn decode(r: &mut $crate::xdr::XdrReader<'_>) -> Result<Self, $crate::xdr::XdrError> {
                Ok(Self(r.read_fixed_opaque::<$len>()?))
            }
        }

        impl $crate::txrep::Txrep for $name {
            fn to_txrep(&self, key: &str, out: &mut $crate::txrep::TxrepWriter) {
                out.push(key, self.to_hex());
            }

            fn from_txrep(
                key: &str,
                doc: &$crate::txrep::TxrepDocument,
            ) -> Result<Self, $crate::txrep::TxrepError> {
                Self::from_hex(doc.get(key)?).map_err(|e| $crate::txrep::TxrepError::InvalidValue {
                    key: key.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    };
}

macro_rules! xdr_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(i32)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const VARIANTS: &'static [$name] = &[$($name::$variant),+];

            /// The wire value of this variant.
            pub fn value(self) -> i32 {
                self as i32
            }

            pub fn from_value(value: i32) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// The XDR token name, e.g. `PAYMENT` or `MEMO_TEXT`.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$variant => $token, )+
                }
            }

            pub fn from_name(token: &str) -> Option<Self> {
                match token {
                    $( $token => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::xdr::XdrDiscriminant for $name {
            fn as_i32(self) -> i32 {
                self as i32
            }
        }

        impl $crate::xdr::XdrCodec for $name {
            fn encode(&self, w: &mut $crate::xdr::XdrWriter) -> Result<(), $crate::xdr::XdrError> {
                w.write_i32(*self as i32);
                Ok(())
            }

            fn decode(r: &mut $crate::xdr::XdrReader<'_>) -> Result<Self, $crate::xdr::XdrError> {
                let value = r.read_i32()?;
                Self::from_value(value).ok_or($crate::xdr::XdrError::UnknownDiscriminant {
                    type_name: stringify!($name),
                    value,
                })
            }
        }

        impl $crate::txrep::Txrep for $name {
            fn to_txrep(&self, key: &str, out: &mut $crate::txrep::TxrepWriter) {
                out.push(key, self.name());
            }

            fn from_txrep(
                key: &str,
                doc: &$crate::txrep::TxrepDocument,
            ) -> Result<Self, $crate::txrep::TxrepError> {
                let raw = doc.get(key)?;
                Self::from_name(raw).ok_or_else(|| $crate::txrep::TxrepError::InvalidValue {
                    key: key.to_string(),
                    reason: format!("unknown {} token `{}`", stringify!($name), raw),
                })
            }
        }
    };
}

macro_rules! xdr_struct {
    (
        @codec
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty => $tag:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::xdr::XdrCodec for $name {
            fn encode(&self, w: &mut $crate::xdr::XdrWriter) -> Result<(), $crate::xdr::XdrError> {
                $( $crate::xdr::XdrCodec::encode(&self.$field, w)?; )*
                Ok(())
            }

            fn decode(r: &mut $crate::xdr::XdrReader<'_>) -> Result<Self, $crate::xdr::XdrError> {
                r.enter()?;
                let value = Self {
                    $( $field: <$ty as $crate::xdr::XdrCodec>::decode(r)?, )*
                };
                r.leave();
                Ok(value)
            }
        }
    };

    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* pub $field:ident : $ty:ty => $tag:literal ),* $(,)?
        }
    ) => {
        xdr_struct! {
            @codec
            $(#[$meta])*
            pub struct $name {
                $( $(#[$fmeta])* pub $field : $ty => $tag, )*
            }
        }

        impl $crate::txrep::Txrep for $name {
            fn to_txrep(&self, key: &str, out: &mut $crate::txrep::TxrepWriter) {
                $( $crate::txrep::Txrep::to_txrep(&self.$field, &$crate::txrep::join_key(key, $tag), out); )*
            }

            fn from_txrep(
                key: &str,
                doc: &$crate::txrep::TxrepDocument,
            ) -> Result<Self, $crate::txrep::TxrepError> {
                Ok(Self {
                    $( $field: <$ty as $crate::txrep::Txrep>::from_txrep(&$crate::txrep::join_key(key, $tag), doc)?, )*
                })
            }
        }
    };
}

macro_rules! xdr_union {
    // -- per-arm helpers ----------------------------------------------------
    (@pat $name:ident, $variant:ident, $bind:ident) => { $name::$variant };
    (@pat $name:ident, $variant:ident, $bind:ident, $payload:ty) => { $name::$variant($bind) };

    (@encode $w:ident, $bind:ident) => { () };
    (@encode $w:ident, $bind:ident, $payload:ty) => {
        $crate::xdr::XdrCodec::encode($bind, $w)?
    };

    (@decode $name:ident, $variant:ident, $r:ident) => { $name::$variant };
    (@decode $name:ident, $variant:ident, $r:ident, $payload:ty) => {
        $name::$variant(<$payload as $crate::xdr::XdrCodec>::decode($r)?)
    };

    (@txrep_out $key:ident, $out:ident, $bind:ident) => { () };
    (@txrep_out $key:ident, $out:ident, $bind:ident, $payload:ty, $tag:literal) => {
        $crate::txrep::Txrep::to_txrep($bind, &$crate::txrep::join_key($key, $tag), $out)
    };

    (@txrep_in $name:ident, $variant:ident, $key:ident, $doc:ident) => { $name::$variant };
    (@txrep_in $name:ident, $variant:ident, $key:ident, $doc:ident, $payload:ty, $tag:literal) => {
        $name::$variant(<$payload as $crate::txrep::Txrep>::from_txrep(
            &$crate::txrep::join_key($key, $tag),
            $doc,
        )?)
    };

    // -- codec only ---------------------------------------------------------
    (
        @codec
        $(#[$meta:meta])*
        pub enum $name:ident ($disc_ty:ty, $disc_key:literal) {
            $( $(#[$vmeta:meta])* $disc:expr => $variant:ident $( ( $payload:ty, $tag:literal ) )? ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant $( ($payload) )?, )+
        }

        impl $name {
            /// The discriminant this value encodes with.
            pub fn discriminant(&self) -> $disc_ty {
                match self {
                    $( Self::$variant { .. } => $disc, )+
                }
            }
        }

        impl $crate::xdr::XdrCodec for $name {
            fn encode(&self, w: &mut $crate::xdr::XdrWriter) -> Result<(), $crate::xdr::XdrError> {
                $crate::xdr::XdrCodec::encode(&self.discriminant(), w)?;
                match self {
                    $(
                        xdr_union!(@pat $name, $variant, value $(, $payload)?) => {
                            xdr_union!(@encode w, value $(, $payload)?);
                        }
                    )+
                }
                Ok(())
            }

            fn decode(r: &mut $crate::xdr::XdrReader<'_>) -> Result<Self, $crate::xdr::XdrError> {
                $( #[allow(non_upper_case_globals)] const $variant: $disc_ty = $disc; )+

                r.enter()?;
                let disc = <$disc_ty as $crate::xdr::XdrCodec>::decode(r)?;
                #[allow(unreachable_patterns)]
                let value = match disc {
                    $( $variant => xdr_union!(@decode $name, $variant, r $(, $payload)?), )+
                    _ => {
                        return Err($crate::xdr::XdrError::UnknownDiscriminant {
                            type_name: stringify!($name),
                            value: $crate::xdr::XdrDiscriminant::as_i32(disc),
                        })
                    }
                };
                r.leave();
                Ok(value)
            }
        }
    };

    // -- codec + txrep ------------------------------------------------------
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($disc_ty:ty, $disc_key:literal) {
            $( $(#[$vmeta:meta])* $disc:expr => $variant:ident $( ( $payload:ty, $tag:literal ) )? ),+ $(,)?
        }
    ) => {
        xdr_union! {
            @codec
            $(#[$meta])*
            pub enum $name ($disc_ty, $disc_key) {
                $( $(#[$vmeta])* $disc => $variant $( ( $payload, $tag ) )?, )+
            }
        }

        impl $crate::txrep::Txrep for $name {
            fn to_txrep(&self, key: &str, out: &mut $crate::txrep::TxrepWriter) {
                $crate::txrep::Txrep::to_txrep(
                    &self.discriminant(),
                    &$crate::txrep::join_key(key, $disc_key),
                    out,
                );
                match self {
                    $(
                        xdr_union!(@pat $name, $variant, value $(, $payload)?) => {
                            xdr_union!(@txrep_out key, out, value $(, $payload, $tag)?);
                        }
                    )+
                }
            }

            fn from_txrep(
                key: &str,
                doc: &$crate::txrep::TxrepDocument,
            ) -> Result<Self, $crate::txrep::TxrepError> {
                $( #[allow(non_upper_case_globals)] const $variant: $disc_ty = $disc; )+

                let disc_key = $crate::txrep::join_key(key, $disc_key);
                let disc = <$disc_ty as $crate::txrep::Txrep>::from_txrep(&disc_key, doc)?;
                #[allow(unreachable_patterns)]
                match disc {
                    $( $variant => Ok(xdr_union!(@txrep_in $name, $variant, key, doc $(, $payload, $tag)?)), )+
                    _ => Err($crate::txrep::TxrepError::InvalidValue {
                        key: disc_key,
                        reason: format!("discriminant not valid for {}", stringify!($name)),
                    }),
                }
            }
        }
    };
}

macro_rules! xdr_result {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($code_ty:ident) {
            $( $(#[$vmeta:meta])* $code:ident => $variant:ident $( ( $payload:ty ) )? ),+ $(,)?
        }
        $( reject [ $( $bad:ident ),+ $(,)? ] )?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant $( ($payload) )?, )+
            /// Any other result code. These arms carry no payload.
            Error($code_ty),
        }

        impl $name {
            /// The result code this value encodes with.
            pub fn code(&self) -> $code_ty {
                match self {
                    $( Self::$variant { .. } => $code_ty::$code, )+
                    Self::Error(code) => *code,
                }
            }
        }

        impl $crate::xdr::XdrCodec for $name {
            fn encode(&self, w: &mut $crate::xdr::XdrWriter) -> Result<(), $crate::xdr::XdrError> {
                if let Self::Error(code) = self {
                    if matches!(code, $( $code_ty::$code )|+ $( $( | $code_ty::$bad )+ )?) {
                        return Err($crate::xdr::XdrError::InvalidValue(format!(
                            "{} code {} cannot be encoded as a void arm",
                            stringify!($name),
                            code
                        )));
                    }
                }
                $crate::xdr::XdrCodec::encode(&self.code(), w)?;
                match self {
                    $(
                        xdr_union!(@pat $name, $variant, value $(, $payload)?) => {
                            xdr_union!(@encode w, value $(, $payload)?);
                        }
                    )+
                    Self::Error(_) => {}
                }
                Ok(())
            }

            fn decode(r: &mut $crate::xdr::XdrReader<'_>) -> Result<Self, $crate::xdr::XdrError> {
                r.enter()?;
                let code = <$code_ty as $crate::xdr::XdrCodec>::decode(r)?;
                let value = match code {
                    $( $code_ty::$code => xdr_union!(@decode $name, $variant, r $(, $payload)?), )+
                    $( $( $code_ty::$bad => {
                        return Err($crate::xdr::XdrError::UnknownDiscriminant {
                            type_name: stringify!($name),
                            value: code.value(),
                        });
                    } )+ )?
                    other => Self::Error(other),
                };
                r.leave();
                Ok(value)
            }
        }
    };
}
