/// An object that can live in a [`Pool`] and be recycled after it dies.
pub trait Poolable {
    type Params;

    fn create(params: Self::Params) -> Self;

    /// Reinitialize a retired slot in place.
    fn reset(&mut self, params: Self::Params);

    fn update(&mut self, dt: f32);

    fn is_alive(&self) -> bool;
}

/// Fixed-capacity arena. Live objects always occupy `[0, live)`; slots past
/// the cursor are retired and get reused before anything new is allocated.
#[derive(Debug, Clone)]
pub struct Pool<T> {
    objects: Vec<T>,
    live: usize,
    capacity: usize,
}

impl<T: Poolable> Pool<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Pool {
            objects: Vec::with_capacity(capacity),
            live: 0,
            capacity,
        }
    }

    /// Activates an object, or drops the request when the pool is full.
    pub fn create(&mut self, params: T::Params) -> Option<&mut T> {
        if self.live >= self.capacity {
            return None;
        }
        if self.live < self.objects.len() {
            self.objects[self.live].reset(params);
        } else {
            self.objects.push(T::create(params));
        }
        self.live += 1;
        self.objects.get_mut(self.live - 1)
    }

    /// Advances every live object and compacts the dead ones past the cursor.
    pub fn update(&mut self, dt: f32) {
        let mut any_died = false;
        for object in &mut self.objects[..self.live] {
            object.update(dt);
            any_died |= !object.is_alive();
        }
        if !any_died {
            return;
        }

        let mut write = 0;
        for read in 0..self.live {
            if self.objects[read].is_alive() {
                self.objects.swap(write, read);
                write += 1;
            }
        }
        self.live = write;
    }

    /// The live objects, in creation order.
    pub fn live(&self) -> &[T] {
        &self.objects[..self.live]
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Slots ever allocated, live or retired.
    pub fn allocated(&self) -> usize {
        self.objects.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
