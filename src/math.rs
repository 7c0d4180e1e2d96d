//! Math shims so the numeric core works identically under `std` and `no-std` + `libm`.

#[cfg(feature = "no-std")]
use libm;

#[inline]
pub fn abs(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.abs()
    }
    #[cfg(feature = "no-std")]
    {
        libm::fabs(val)
    }
}

#[inline]
pub fn ceil(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.ceil()
    }
    #[cfg(feature = "no-std")]
    {
        libm::ceil(val)
    }
}

#[inline]
pub fn floor(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.floor()
    }
    #[cfg(feature = "no-std")]
    {
        libm::floor(val)
    }
}

#[inline]
pub fn exp(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.exp()
    }
    #[cfg(feature = "no-std")]
    {
        libm::exp(val)
    }
}

#[inline]
pub fn ln(val: f64) -> f64 {
    #[cfg(not(feature = "no-std"))]
    {
        val.ln()
    }
    #[cfg(feature = "no-std")]
    {
        libm::log(val)
    }
}
