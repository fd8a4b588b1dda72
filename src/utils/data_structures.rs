/// data structures shared by the search algorithms

use std::ops::Index;

/// ValidFlags can be used to efficiently store a large amount of values that need to be invalidated very quickly
/// the whole array can be invalidated with a single instruction without iterating over the whole array
#[derive(Clone, Debug)]
pub struct ValidFlags<T: Copy> {
    valid_flags: Vec<usize>,
    valid_flag: usize,
    default_value: T,
    data: Vec<T>
}

impl<T: Copy> Index<usize> for ValidFlags<T> {

    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        if self.valid_flags[index] == self.valid_flag {
            return &self.data[index];
        }
        
        &self.default_value
    }
}

impl<T: Copy> ValidFlags<T> {

    pub fn new(size: usize, default_value: T) -> Self {
        ValidFlags {
            valid_flags: vec![0; size],
            valid_flag: 1,
            default_value,
            data: vec![default_value; size]
        }
    }

    /// invalidates all entries
    pub fn reset(&mut self) {
        if self.valid_flag == usize::MAX {
            self.valid_flag = 1;

            let current_len = self.data.len();
            self.data = vec![self.default_value; current_len];
            self.valid_flags = vec![0; current_len];
        }
        else {
            self.valid_flag += 1;
        }
    }

    pub fn set(&mut self, index: usize, value: T) {
        self.data[index] = value;
        self.valid_flags[index] = self.valid_flag;
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.valid_flags[index] == self.valid_flag
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// stores a 2d matrix inside a single 1d array
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T: Copy> {
    pub data: Vec<T>,

    rows: usize,
    cols: usize,
}

impl<T: Copy> Matrix<T> {
    
    pub fn new(rows: usize, cols: usize, initial_value: T) -> Self {
        Matrix {
            data: vec![initial_value; rows * cols],
            rows,
            cols
        }
    }

    pub fn empty() -> Self {
        Matrix {
            data: Vec::new(),
            rows: 0,
            cols: 0
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[(row * self.cols)..((row + 1) * self.cols)]
    }

    /// drops the current content and resizes the matrix to rows * cols initial values
    pub fn resize(&mut self, rows: usize, cols: usize, initial_value: T) {
        self.data.clear();
        self.data.resize(rows * cols, initial_value);
        self.rows = rows;
        self.cols = cols;
    }
}
