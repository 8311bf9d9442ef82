#[cfg(feature = "tracing")]
macro_rules! pftrace {
    ($($tt:tt)*) => {
        tracing::trace!(target: "pagefeed", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pftrace {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! pfdebug {
    ($($tt:tt)*) => {
        tracing::debug!(target: "pagefeed", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pfdebug {
    ($($tt:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! pfwarn {
    ($($tt:tt)*) => {
        tracing::warn!(target: "pagefeed", $($tt)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pfwarn {
    ($($tt:tt)*) => {};
}
