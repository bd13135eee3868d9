// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The indexed-object contract.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::sync::Arc;

use crate::rect::Rect;

/// An object with a rectangular extent, suitable for spatial indexing.
///
/// The reported bounds must stay the same for as long as the object is a
/// member of any index. To move or resize an indexed object, remove it,
/// change it, and insert it again.
pub trait Bounded {
    /// The object's current bounds.
    fn bounds(&self) -> Rect;
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

impl<B: Bounded + ?Sized> Bounded for &B {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<B: Bounded + ?Sized> Bounded for &mut B {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<B: Bounded + ?Sized> Bounded for Box<B> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<B: Bounded + ?Sized> Bounded for Rc<B> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

impl<B: Bounded + ?Sized> Bounded for Arc<B> {
    fn bounds(&self) -> Rect {
        (**self).bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tile(Rect);

    impl Bounded for Tile {
        fn bounds(&self) -> Rect {
            self.0
        }
    }

    #[test]
    fn smart_pointers_delegate() {
        let tile = Tile(Rect::new(1, 2, 3, 4));
        assert_eq!((&tile).bounds(), Rect::new(1, 2, 3, 4));
        let boxed: Box<dyn Bounded> = Box::new(Tile(Rect::new(0, 0, 5, 5)));
        assert_eq!(boxed.bounds(), Rect::new(0, 0, 5, 5));
        let shared = Rc::new(Tile(Rect::new(7, 7, 1, 1)));
        assert_eq!(shared.bounds(), Rect::new(7, 7, 1, 1));
    }

    #[test]
    fn rect_is_its_own_bounds() {
        let r = Rect::new(-3, -4, 10, 10);
        assert_eq!(r.bounds(), r);
    }
}
