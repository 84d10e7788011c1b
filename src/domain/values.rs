//! Provider-defined enumerations.
//!
//! IremboPay transmits statuses, currencies, and provider names as strings and
//! adds new values over time. Each type here is a closed enum for the values
//! this library knows about plus an `Other` variant that keeps unrecognised
//! wire values verbatim, so decoding and re-encoding never alters a payload.

/// Declares a string-backed enum with an `Other(String)` fallback.
///
/// Generates `as_str`, `is_other`, `Display`, `From<String>`, `From<&str>`,
/// `From<Self> for String`, and serde support through the string conversions.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value not recognised by this version of the library.
            Other(String),
        }

        impl $name {
            /// Wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Other(raw) => raw.as_str(),
                }
            }

            /// Whether the wire value was not recognised.
            pub fn is_other(&self) -> bool {
                matches!(self, $name::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $wire => $name::$variant, )+
                    _ => $name::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(raw) => raw,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Payment state of an invoice.
    PaymentStatus {
        /// Invoice created, not yet paid.
        New => "NEW",
        /// Invoice settled.
        Paid => "PAID",
    }
}

impl PaymentStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

wire_enum! {
    /// Invoice currency. Amounts are passed through untouched.
    Currency {
        Rwf => "RWF",
        Eur => "EUR",
        Gbp => "GBP",
        Usd => "USD",
    }
}

wire_enum! {
    /// Method the payer used to settle an invoice.
    PaymentMethod {
        MtnMomo => "MTN_MOMO",
        AirtelMoney => "AIRTEL_MONEY",
        Card => "CARD",
        BankTransfer => "BANK_TRANSFER",
    }
}

wire_enum! {
    /// Mobile-money operator used to initiate a push payment.
    MomoProvider {
        Mtn => "MTN",
        Airtel => "AIRTEL",
    }
}

wire_enum! {
    /// Single invoice or batch of invoices.
    InvoiceType {
        Single => "SINGLE",
        Batch => "BATCH",
    }
}

wire_enum! {
    /// Language of the checkout page and notifications.
    Language {
        En => "EN",
        Fr => "FR",
        Rw => "RW",
    }
}
